use crate::constants::{GATE_END, GATE_START};
use crate::math::Scalar;
use crate::params::SimulationParameters;

/// Vertical deflecting field `Ey` at `(x, y)`.
///
/// Inside the gate (`x ∈ [2.5L, 3.5L]`, `y ∈ [-h, 0]`) the capacitor produces a
/// uniform field `UNM / h`; everywhere else the field vanishes. `h` is the
/// effective strip thickness.
#[inline]
#[must_use]
pub fn deflecting_field(x: Scalar, y: Scalar, params: &SimulationParameters, h: Scalar) -> Scalar {
    let l = params.length;
    let in_gate_x = x >= GATE_START * l && x <= GATE_END * l;
    let in_gate_y = y >= -h && y <= 0.0;
    if in_gate_x && in_gate_y {
        params.deflection_voltage / h
    } else {
        0.0
    }
}
