//! Distance helpers in block units.
//!
//! World coordinates are flat `(x, z)` block positions, so plain Euclidean
//! distance is exact here.

use geo::{EuclideanDistance, Point};

/// Straight-line distance between two points, in blocks.
pub fn block_distance(p1: Point, p2: Point) -> f64 {
    p1.euclidean_distance(&p2)
}

/// Whether `radius` can bound a query. Zero is allowed (exact position).
pub fn valid_radius(radius: f64) -> bool {
    radius.is_finite() && radius >= 0.0
}
