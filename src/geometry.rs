//! Point primitives used by hit testing and texture synthesis.

use floem::kurbo::Point;

use crate::error::{PickerError, PickerResult};

/// Euclidean distance between two points.
pub fn distance(p: Point, q: Point) -> f64 {
    (p - q).hypot()
}

/// Perpendicular distance from `p` to the infinite line through `a` and `b`.
///
/// A degenerate line (`a == b`) has no direction; the distance is 0.
pub fn distance_to_line(p: Point, a: Point, b: Point) -> f64 {
    let numerator = (b.x - a.x) * (a.y - p.y) - (a.x - p.x) * (b.y - a.y);
    let length_sq = (b.x - a.x) * (b.x - a.x) + (b.y - a.y) * (b.y - a.y);
    if length_sq == 0.0 {
        return 0.0;
    }
    numerator.abs() / length_sq.sqrt()
}

/// Point reflection of `p` through `center`.
pub fn mirror(p: Point, center: Point) -> Point {
    Point::new(2.0 * center.x - p.x, 2.0 * center.y - p.y)
}

/// Reject NaN and infinite input before it reaches the geometry.
pub fn ensure_finite(x: f64, y: f64) -> PickerResult<Point> {
    if x.is_finite() && y.is_finite() {
        Ok(Point::new(x, y))
    } else {
        Err(PickerError::NonFiniteCoordinate { x, y })
    }
}
