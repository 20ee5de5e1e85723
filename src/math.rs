//! Shared numerical primitives anchored on `nalgebra`.

use nalgebra::{Vector2, Vector4};

use crate::constants::CROSSING_SLOPE_EPSILON;

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Convenient alias for two-dimensional real vectors.
pub type R2 = Vector2<Scalar>;
/// Packed phase-space vector `[x, y, vx, vy]`.
pub type PhaseVector = Vector4<Scalar>;

/// Rounds `value` to `decimals` places after the decimal point.
#[must_use]
pub fn round_to(value: Scalar, decimals: i32) -> Scalar {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Returns true when the segment `y0 -> y1` crosses the horizontal level `level`.
///
/// A point exactly on the level counts as being below it, so a segment ending on
/// the level is a crossing while one starting on it and moving down is not.
#[inline]
#[must_use]
pub fn crosses_level(y0: Scalar, y1: Scalar, level: Scalar) -> bool {
    (y0 > level) != (y1 > level)
}

/// Linearly interpolates the x coordinate at which the segment
/// `(x0, y0) -> (x1, y1)` reaches `level`.
///
/// Near-horizontal segments (|Δy| below 1e-12) return `x1` unchanged.
#[must_use]
pub fn interpolate_crossing_x(
    x0: Scalar,
    y0: Scalar,
    x1: Scalar,
    y1: Scalar,
    level: Scalar,
) -> Scalar {
    let dy = y1 - y0;
    if dy.abs() < CROSSING_SLOPE_EPSILON {
        return x1;
    }
    let t = (level - y0) / dy;
    x0 + t * (x1 - x0)
}
