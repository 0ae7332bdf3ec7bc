//! Procedural textures for the hue ring and the saturation/value triangle.
//!
//! Both are rasterized once per layout into fresh RGBA8 buffers (straight
//! alpha, row-major). Pixels are independent, so with the `parallel`
//! feature rows are filled across the rayon pool. A grid is only handed
//! out once every row is written.

use std::time::Instant;

use floem::kurbo::Point;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::constants::MAX_RASTER_SIDE;
use crate::error::{PickerError, PickerResult};
use crate::math;
use crate::triangle::Triangle;

/// Width of the anti-aliased fade at the ring's edges, in pixels.
const RING_FEATHER: f64 = 1.0;

/// A finished RGBA8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelGrid {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes, `width * height * 4` long.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// RGBA of one pixel, or `None` outside the grid.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.pixels[offset..offset + 4]);
        Some(rgba)
    }

    /// Allocate a `width` x `height` grid and fill each row with `shade_row`.
    fn rasterize<F>(width: u32, height: u32, shade_row: F) -> Self
    where
        F: Fn(u32, &mut [u8]) + Send + Sync,
    {
        let row_len = width as usize * 4;
        let mut pixels = vec![0u8; row_len * height as usize];
        if row_len > 0 {
            #[cfg(feature = "parallel")]
            pixels
                .par_chunks_mut(row_len)
                .enumerate()
                .for_each(|(py, row)| shade_row(py as u32, row));
            #[cfg(not(feature = "parallel"))]
            pixels
                .chunks_mut(row_len)
                .enumerate()
                .for_each(|(py, row)| shade_row(py as u32, row));
        }
        Self {
            width,
            height,
            pixels,
        }
    }
}

/// Side of the square raster covering a circle of `radius`, or `None` past
/// [`MAX_RASTER_SIDE`].
fn raster_side(radius: f64) -> Option<u32> {
    let side = 2.0 * radius.floor();
    (side <= MAX_RASTER_SIDE as f64).then_some(side as u32)
}

/// Rasterize the hue ring between `inner_radius` and `outer_radius`.
///
/// Angle from the center maps to hue. Saturation peaks on the ring's
/// center-line and fades to white at both edges as
/// `sqrt(min(mid / d, d / mid))`. Pixels outside the annulus are
/// transparent.
pub fn generate_hue_ring(outer_radius: f64, inner_radius: f64) -> PickerResult<PixelGrid> {
    if !(outer_radius.is_finite()
        && inner_radius.is_finite()
        && inner_radius >= 0.0
        && outer_radius >= 1.0
        && inner_radius < outer_radius)
    {
        return Err(PickerError::InvalidRadius {
            outer: outer_radius,
            inner: inner_radius,
        });
    }

    let side = raster_side(outer_radius).ok_or(PickerError::InvalidRadius {
        outer: outer_radius,
        inner: inner_radius,
    })?;
    let started = Instant::now();
    let center = side as f64 / 2.0;
    let mid_radius = (outer_radius + inner_radius) / 2.0;

    let grid = PixelGrid::rasterize(side, side, |py, row| {
        let dy = py as f64 + 0.5 - center;
        for px in 0..side {
            let dx = px as f64 + 0.5 - center;
            let dist = (dx * dx + dy * dy).sqrt();

            let coverage = ((outer_radius - dist) / RING_FEATHER).clamp(0.0, 1.0)
                * ((dist - inner_radius) / RING_FEATHER).clamp(0.0, 1.0);
            if coverage <= 0.0 {
                continue;
            }

            let falloff = (mid_radius / dist).min(dist / mid_radius);
            let mut hue = dy.atan2(dx) / std::f64::consts::TAU;
            if hue < 0.0 {
                hue += 1.0;
            }

            let (r, g, b) = math::hsb_to_rgb(hue, falloff.sqrt(), 1.0);
            let offset = px as usize * 4;
            row[offset] = math::unit_to_byte(r);
            row[offset + 1] = math::unit_to_byte(g);
            row[offset + 2] = math::unit_to_byte(b);
            row[offset + 3] = math::unit_to_byte(coverage);
        }
    });

    tracing::debug!(
        side,
        outer_radius,
        inner_radius,
        elapsed_us = started.elapsed().as_micros() as u64,
        "rasterized hue ring"
    );
    Ok(grid)
}

/// Rasterize the black/white overlay for a triangle inscribed in `radius`.
///
/// Drawn over a triangle filled with the chroma, it produces the
/// saturation/value gradient. Each pixel is a black layer with
/// [`ShadeWeights::black`](crate::ShadeWeights) opacity under a white layer
/// with `white` opacity, composited source-over in that order. Pixels
/// outside the triangle are transparent.
pub fn generate_sat_val_mask(radius: f64) -> PickerResult<PixelGrid> {
    if !(radius.is_finite() && radius >= 1.0) {
        return Err(PickerError::InvalidRadius {
            outer: radius,
            inner: radius,
        });
    }

    let side = raster_side(radius).ok_or(PickerError::InvalidRadius {
        outer: radius,
        inner: radius,
    })?;
    let started = Instant::now();
    let center = side as f64 / 2.0;
    let triangle = Triangle::inscribed(Point::new(center, center), radius);

    let grid = PixelGrid::rasterize(side, side, |py, row| {
        let y = py as f64 + 0.5;
        for px in 0..side {
            let p = Point::new(px as f64 + 0.5, y);
            if !triangle.contains(p) {
                continue;
            }
            let weights = triangle.shade_weights(p);
            let (gray, alpha) = composite_white_over_black(weights.black, weights.white);
            let offset = px as usize * 4;
            row[offset] = gray;
            row[offset + 1] = gray;
            row[offset + 2] = gray;
            row[offset + 3] = alpha;
        }
    });

    tracing::debug!(
        side,
        radius,
        elapsed_us = started.elapsed().as_micros() as u64,
        "rasterized saturation/value mask"
    );
    Ok(grid)
}

/// Source-over of a white layer on a black layer, as straight-alpha
/// `(gray, alpha)` bytes.
fn composite_white_over_black(black: f64, white: f64) -> (u8, u8) {
    let black = black.clamp(0.0, 1.0);
    let white = white.clamp(0.0, 1.0);
    let alpha = white + black * (1.0 - white);
    if alpha <= 0.0 {
        return (0, 0);
    }
    (math::unit_to_byte(white / alpha), math::unit_to_byte(alpha))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_is_transparent_outside_the_annulus() {
        let ring = generate_hue_ring(120.0, 96.0).unwrap();
        assert_eq!((ring.width(), ring.height()), (240, 240));
        assert_eq!(ring.pixels().len(), 240 * 240 * 4);

        // Center, inside the inner circle, and the corner outside the outer one.
        assert_eq!(ring.pixel(120, 120).unwrap()[3], 0);
        assert_eq!(ring.pixel(120 + 80, 120).unwrap()[3], 0);
        assert_eq!(ring.pixel(0, 0).unwrap()[3], 0);
        assert!(ring.pixel(240, 0).is_none());
    }

    #[test]
    fn ring_is_saturated_on_its_center_line() {
        let ring = generate_hue_ring(120.0, 96.0).unwrap();
        // Pixel whose center is 108 px right of the ring center: hue 0.
        let [r, g, b, a] = ring.pixel(120 + 107, 119).unwrap();
        assert_eq!(a, 255);
        assert!(r == 255 && g < 10 && b < 10, "{r} {g} {b}");

        // Straight down the ring is at 90 degrees, yellow-green side of the wheel.
        let [r, g, b, _] = ring.pixel(119, 120 + 107).unwrap();
        assert!(g == 255 && r > 100 && b < 10, "{r} {g} {b}");
    }

    #[test]
    fn ring_whitens_toward_its_edges() {
        let ring = generate_hue_ring(120.0, 96.0).unwrap();
        let center_line = ring.pixel(120 + 107, 119).unwrap();
        let near_edge = ring.pixel(120 + 117, 119).unwrap();
        assert!(near_edge[1] > center_line[1]);
        assert_eq!(near_edge[0], 255);
    }

    #[test]
    fn ring_rejects_bad_radii() {
        assert!(generate_hue_ring(50.0, 60.0).is_err());
        assert!(generate_hue_ring(f64::NAN, 10.0).is_err());
        assert!(generate_hue_ring(0.5, 0.0).is_err());
    }

    #[test]
    fn mask_corners_and_outside() {
        let mask = generate_sat_val_mask(100.0).unwrap();
        assert_eq!((mask.width(), mask.height()), (200, 200));

        // Outside the triangle (right of the left edge is x >= 50).
        assert_eq!(mask.pixel(10, 100).unwrap(), [0, 0, 0, 0]);

        // Near the apex both layers vanish.
        let apex = mask.pixel(197, 99).unwrap();
        assert!(apex[3] < 8, "{apex:?}");

        // Near the upper-left corner the white layer dominates.
        let top = mask.pixel(51, 16).unwrap();
        assert!(top[0] > 240 && top[3] > 240, "{top:?}");

        // Near the lower-left corner it is opaque black.
        let bottom = mask.pixel(51, 183).unwrap();
        assert!(bottom[0] < 16 && bottom[3] > 240, "{bottom:?}");
    }

    #[test]
    fn white_composites_over_black() {
        assert_eq!(composite_white_over_black(0.0, 0.0), (0, 0));
        assert_eq!(composite_white_over_black(1.0, 0.0), (0, 255));
        assert_eq!(composite_white_over_black(0.0, 1.0), (255, 255));
        // Half black under half white: 75% coverage, two thirds of it white.
        assert_eq!(composite_white_over_black(0.5, 0.5), (170, 191));
    }

    #[test]
    fn mask_rejects_bad_radius() {
        assert!(generate_sat_val_mask(0.0).is_err());
        assert!(generate_sat_val_mask(f64::INFINITY).is_err());
    }

    #[test]
    fn oversized_rasters_are_rejected() {
        assert!(matches!(
            generate_hue_ring(16_384.0, 13_000.0),
            Err(PickerError::InvalidRadius { .. })
        ));
        assert!(generate_sat_val_mask(1.0e9).is_err());

        let half = f64::from(MAX_RASTER_SIDE / 2);
        assert_eq!(raster_side(half), Some(MAX_RASTER_SIDE));
        assert_eq!(raster_side(half + 1.0), None);
    }
}
