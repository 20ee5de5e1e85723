//! Baseline numeric constants and device geometry.
//!
//! ## Geometry
//!
//! Every boundary of the device is expressed as a multiple of the length scale
//! `L`. The renderer and the engine must agree on these values; they are the
//! shared contract between both sides:
//!
//! | Feature              | Extent                         |
//! |----------------------|--------------------------------|
//! | Target plates        | `x ∈ [L, 2L]`                  |
//! | Deflection gate      | `x ∈ [2.5L, 3.5L]`             |
//! | Escape envelope      | `x ∈ [-0.5L, 4.2L]`, `|y| ≤ 3L` |
//!
//! The field-free strip spans `-H ≤ y ≤ 0`.

use crate::math::Scalar;

/// Floor applied to mass and height denominators and the launch offset factor.
pub const EPSILON: Scalar = 1.0e-6;
/// Slope below which a crossing is treated as degenerate during interpolation.
pub const CROSSING_SLOPE_EPSILON: Scalar = 1.0e-12;

/// Reference integration step size.
pub const DEFAULT_TIME_STEP: Scalar = 0.002;
/// Reference ceiling on integration steps per trajectory.
pub const DEFAULT_MAX_STEPS: usize = 20_000;

/// Charge-to-mass scale of the reduced ("b") particle variant.
pub const VARIANT_B_RATIO_SCALE: Scalar = 0.25;
/// Ratio between the locked deflection voltage and the operating voltage.
pub const LOCKED_DEFLECTION_RATIO: Scalar = 0.75;
/// Decimal places kept when the deflection voltage is locked.
pub const LOCKED_DEFLECTION_DECIMALS: i32 = 2;

/// Leading edge of the target plates in units of `L`.
pub const PLATE_START: Scalar = 1.0;
/// Trailing edge of the target plates in units of `L`.
pub const PLATE_END: Scalar = 2.0;
/// Leading edge of the deflection gate in units of `L`.
pub const GATE_START: Scalar = 2.5;
/// Trailing edge of the deflection gate in units of `L`.
pub const GATE_END: Scalar = 3.5;
/// Lower x bound of the escape envelope in units of `L`.
pub const ENVELOPE_X_MIN: Scalar = -0.5;
/// Upper x bound of the escape envelope in units of `L`.
pub const ENVELOPE_X_MAX: Scalar = 4.2;
/// Half-height of the escape envelope in units of `L`.
pub const ENVELOPE_Y_MAX: Scalar = 3.0;

/// Floors the magnitude of `value` to [`EPSILON`].
#[inline]
#[must_use]
pub fn floored_magnitude(value: Scalar) -> Scalar {
    value.abs().max(EPSILON)
}
