//! The saturation/value triangle inscribed in the ring's inner circle.
//!
//! The apex points right. Its right-hand corner shows the chroma, the upper
//! left corner white and the lower left corner black (y grows downward).
//! A point's color is found from its perpendicular distances to the three
//! edges; the same weights drive both the gradient mask and touch input.

use floem::kurbo::{BezPath, Point};

use crate::geometry::distance_to_line;

/// How much black and white cover the chroma at a point in the triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadeWeights {
    /// Opacity of the black layer, 0.0–1.0.
    pub black: f64,
    /// Opacity of the white layer drawn over the black one, 0.0–1.0.
    pub white: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub left_top: Point,
    pub left_bottom: Point,
    pub right_mid: Point,
    radius: f64,
}

impl Triangle {
    /// Equilateral triangle with all three corners on the circle of `radius`
    /// around `center`.
    pub fn inscribed(center: Point, radius: f64) -> Self {
        let half_side = 0.5 * 3.0_f64.sqrt() * radius;
        Self {
            left_top: Point::new(center.x - 0.5 * radius, center.y - half_side),
            left_bottom: Point::new(center.x - 0.5 * radius, center.y + half_side),
            right_mid: Point::new(center.x + radius, center.y),
            radius,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Distance from the left edge to the opposite corner.
    pub fn height(&self) -> f64 {
        1.5 * self.radius
    }

    pub fn vertices(&self) -> [Point; 3] {
        [self.left_top, self.left_bottom, self.right_mid]
    }

    /// Closed outline, for filling with the chroma and stroking the contour.
    pub fn path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.left_top);
        path.line_to(self.right_mid);
        path.line_to(self.left_bottom);
        path.close_path();
        path
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left_bottom.x
            && p.x <= self.right_mid.x
            && p.y <= edge_y(p.x, self.left_bottom, self.right_mid)
            && p.y >= edge_y(p.x, self.left_top, self.right_mid)
    }

    /// Clamp a point into the triangle: x to the left edge and the apex,
    /// then y between the upper and lower edges at that x.
    pub fn project(&self, p: Point) -> Point {
        let x = p.x.max(self.left_bottom.x).min(self.right_mid.x);
        let y = p
            .y
            .min(edge_y(x, self.left_bottom, self.right_mid))
            .max(edge_y(x, self.left_top, self.right_mid));
        Point::new(x, y)
    }

    /// Edge-distance weights at `p`.
    ///
    /// `black = d2 / (d0 + d2)` and `white = d1 / height`, where `d0`, `d1`
    /// and `d2` are the distances to the left, lower and upper edges.
    pub fn shade_weights(&self, p: Point) -> ShadeWeights {
        let d0 = distance_to_line(p, self.left_bottom, self.left_top);
        let d1 = distance_to_line(p, self.left_bottom, self.right_mid);
        let d2 = distance_to_line(p, self.left_top, self.right_mid);
        let black = if d0 + d2 != 0.0 { d2 / (d0 + d2) } else { 0.0 };
        let height = self.height();
        let white = if height != 0.0 { d1 / height } else { 0.0 };
        ShadeWeights { black, white }
    }

    /// Where an RGB color sits in the triangle.
    ///
    /// The white share `min(r, g, b)` fixes the distance from the lower edge;
    /// `min(255 - r, 255 - g, 255 - b) / (255 - min)` then slides between
    /// the left edge and the upper edge along that level.
    pub fn position_for_rgb(&self, r: u8, g: u8, b: u8) -> Point {
        let sqrt3 = 3.0_f64.sqrt();
        let h1 = r.min(g).min(b) as f64;
        let h2 = (255 - r).min(255 - g).min(255 - b) as f64;

        let d1 = h1 * self.height() / 255.0;
        let fraction = if h1 < 255.0 { h2 / (255.0 - h1) } else { 1.0 };

        let level_y = self.left_bottom.y - d1 * 2.0 / sqrt3;
        let edge_x = self.left_top.x + (level_y - self.left_top.y) * sqrt3 / 2.0;
        let edge_y = (level_y + self.left_top.y) / 2.0;

        Point::new(
            fraction * self.left_top.x + (1.0 - fraction) * edge_x,
            fraction * level_y + (1.0 - fraction) * edge_y,
        )
    }
}

/// y of the line through `a` and `b` at `x`.
fn edge_y(x: f64, a: Point, b: Point) -> f64 {
    let t = (x - a.x) / (b.x - a.x);
    a.y * (1.0 - t) + b.y * t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point, eps: f64) -> bool {
        (a.x - b.x).abs() < eps && (a.y - b.y).abs() < eps
    }

    #[test]
    fn inscribed_vertices_lie_on_the_circle() {
        let center = Point::new(50.0, 0.0);
        let triangle = Triangle::inscribed(center, 100.0);
        for v in triangle.vertices() {
            assert!((v.distance(center) - 100.0).abs() < 1e-9);
        }
        assert!(close(triangle.left_top, Point::new(0.0, -86.6025), 1e-3));
        assert!(close(triangle.left_bottom, Point::new(0.0, 86.6025), 1e-3));
        assert_eq!(triangle.right_mid, Point::new(150.0, 0.0));
        assert_eq!(triangle.height(), 150.0);
    }

    #[test]
    fn corners_have_pure_weights() {
        let triangle = Triangle::inscribed(Point::new(50.0, 0.0), 100.0);
        let apex = triangle.shade_weights(triangle.right_mid);
        assert_eq!(apex, ShadeWeights { black: 0.0, white: 0.0 });

        let top = triangle.shade_weights(triangle.left_top);
        assert!(top.black.abs() < 1e-9 && (top.white - 1.0).abs() < 1e-9);

        let bottom = triangle.shade_weights(triangle.left_bottom);
        assert!((bottom.black - 1.0).abs() < 1e-9 && bottom.white.abs() < 1e-9);
    }

    #[test]
    fn centroid_weights() {
        let triangle = Triangle::inscribed(Point::new(50.0, 0.0), 100.0);
        let w = triangle.shade_weights(Point::new(50.0, 0.0));
        assert!((w.black - 0.5).abs() < 1e-9);
        assert!((w.white - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn containment_and_projection() {
        let triangle = Triangle::inscribed(Point::new(50.0, 0.0), 100.0);
        assert!(triangle.contains(Point::new(50.0, 0.0)));
        assert!(triangle.contains(triangle.right_mid));
        assert!(!triangle.contains(Point::new(-1.0, 0.0)));
        assert!(!triangle.contains(Point::new(140.0, 20.0)));

        assert_eq!(triangle.project(Point::new(-40.0, 0.0)), Point::new(0.0, 0.0));
        assert!(close(
            triangle.project(Point::new(500.0, -300.0)),
            triangle.right_mid,
            1e-9
        ));
        let below = triangle.project(Point::new(50.0, 200.0));
        assert!(triangle.contains(Point::new(below.x, below.y - 1e-9)));
        assert!((below.y - 57.735).abs() < 1e-3);
        let inside = Point::new(60.0, 10.0);
        assert_eq!(triangle.project(inside), inside);
    }

    #[test]
    fn inverse_hits_corners_and_centroid() {
        let triangle = Triangle::inscribed(Point::new(50.0, 0.0), 100.0);
        assert!(close(triangle.position_for_rgb(255, 0, 0), triangle.right_mid, 1e-9));
        assert!(close(triangle.position_for_rgb(255, 255, 255), triangle.left_top, 1e-9));
        assert!(close(triangle.position_for_rgb(0, 0, 0), triangle.left_bottom, 1e-9));
        // Red darkened by half, then lightened by a third.
        assert!(close(triangle.position_for_rgb(170, 85, 85), Point::new(50.0, 0.0), 1e-9));
    }
}
