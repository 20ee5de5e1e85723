//! Geometric layout shared between the engine and any renderer.

use std::fmt;

use crate::constants::{
    ENVELOPE_X_MAX, ENVELOPE_X_MIN, ENVELOPE_Y_MAX, GATE_END, GATE_START, PLATE_END, PLATE_START,
};
use crate::math::Scalar;
use crate::params::SimulationParameters;

/// Plate surface struck by a particle.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// Upper plate at `y = 0`.
    Top,
    /// Lower plate at `y = -H`.
    Bottom,
    /// No plate was struck.
    None,
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::None => "none",
        };
        f.write_str(name)
    }
}

/// Device boundaries resolved for a concrete length scale and strip thickness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceGeometry {
    /// Length scale `L`.
    pub length: Scalar,
    /// Effective strip thickness `max(|H|, ε)`.
    pub height: Scalar,
}

impl DeviceGeometry {
    /// Resolves the geometry of `params`.
    #[must_use]
    pub fn from_params(params: &SimulationParameters) -> Self {
        Self {
            length: params.length,
            height: params.effective_height(),
        }
    }

    /// Height of the plate surface `surface`, if any.
    #[must_use]
    pub fn surface_level(&self, surface: Surface) -> Option<Scalar> {
        match surface {
            Surface::Top => Some(0.0),
            Surface::Bottom => Some(-self.height),
            Surface::None => None,
        }
    }

    /// Horizontal extent `[L, 2L]` of both plates.
    #[must_use]
    pub fn plate_extent(&self) -> (Scalar, Scalar) {
        (PLATE_START * self.length, PLATE_END * self.length)
    }

    /// Horizontal extent `[2.5L, 3.5L]` of the deflection gate.
    #[must_use]
    pub fn gate_extent(&self) -> (Scalar, Scalar) {
        (GATE_START * self.length, GATE_END * self.length)
    }

    /// True when `x` lies on the plates, edges included.
    #[must_use]
    pub fn on_plate(&self, x: Scalar) -> bool {
        let (start, end) = self.plate_extent();
        x >= start && x <= end
    }

    /// True when `(x, y)` has left the escape envelope.
    #[must_use]
    pub fn escaped(&self, x: Scalar, y: Scalar) -> bool {
        let l = self.length;
        x < ENVELOPE_X_MIN * l || x > ENVELOPE_X_MAX * l || y.abs() > ENVELOPE_Y_MAX * l
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plate_edges_are_inclusive() {
        let g = DeviceGeometry { length: 1.0, height: 0.6 };
        assert!(g.on_plate(1.0));
        assert!(g.on_plate(2.0));
        assert!(!g.on_plate(0.999_999));
        assert!(!g.on_plate(2.000_001));
    }

    #[test]
    fn envelope_scales_with_length() {
        let g = DeviceGeometry { length: 2.0, height: 0.6 };
        assert!(!g.escaped(8.0, 5.9));
        assert!(g.escaped(8.5, 0.0));
        assert!(g.escaped(-1.1, 0.0));
        assert!(g.escaped(0.0, -6.1));
    }

    #[test]
    fn from_params_floors_height() {
        let p = SimulationParameters { height: -0.0, ..Default::default() };
        let g = DeviceGeometry::from_params(&p);
        assert!(g.height > 0.0);
        assert_eq!(g.surface_level(Surface::Top), Some(0.0));
        assert_eq!(g.surface_level(Surface::None), None);
    }
}
