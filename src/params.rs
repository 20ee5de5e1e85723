//! Simulation parameters and the physical scalars derived from them.
//!
//! Raw inputs live in [`SimulationParameters`]. Everything else (reference
//! voltage, operating voltage, charge-to-mass ratio, the locked deflection
//! voltage) is a pure function of those inputs. Degenerate denominators are
//! floored to [`EPSILON`](crate::constants::EPSILON) rather than rejected.

use std::fmt;

use crate::constants::{
    floored_magnitude, LOCKED_DEFLECTION_DECIMALS, LOCKED_DEFLECTION_RATIO, VARIANT_B_RATIO_SCALE,
};
use crate::math::{round_to, Scalar};
use crate::simulation::SimulationError;

/// Charge-to-mass configuration of the simulated particle.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParticleVariant {
    /// Reference particle with the full charge-to-mass ratio.
    #[default]
    A,
    /// Particle with one quarter of the reference charge-to-mass ratio.
    B,
}

impl ParticleVariant {
    /// Both variants in display order.
    pub const ALL: [Self; 2] = [Self::A, Self::B];

    /// Multiplier applied to the reference charge-to-mass ratio.
    #[must_use]
    pub const fn ratio_scale(self) -> Scalar {
        match self {
            Self::A => 1.0,
            Self::B => VARIANT_B_RATIO_SCALE,
        }
    }
}

impl fmt::Display for ParticleVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => f.write_str("a"),
            Self::B => f.write_str("b"),
        }
    }
}

/// User-facing inputs describing the device and the particle.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParameters {
    /// Length scale `L`; every geometric boundary is a multiple of it.
    pub length: Scalar,
    /// Magnetic flux density magnitude `B`.
    pub field_strength: Scalar,
    /// Multiplier `k` between operating and reference voltage.
    pub voltage_multiplier: Scalar,
    /// Thickness `H` of the field-free strip.
    pub height: Scalar,
    /// Mass of the reference particle.
    pub mass: Scalar,
    /// Charge of the reference particle.
    pub charge: Scalar,
    /// Which particle variant a single-variant run simulates.
    pub particle_variant: ParticleVariant,
    /// When set, the deflection voltage is derived from the operating voltage.
    pub lock_deflection_voltage: bool,
    /// Voltage `UNM` across the gate plates.
    pub deflection_voltage: Scalar,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            length: 1.0,
            field_strength: 0.8,
            voltage_multiplier: 1.0,
            height: 0.6,
            mass: 1.0,
            charge: 1.0,
            particle_variant: ParticleVariant::A,
            lock_deflection_voltage: true,
            deflection_voltage: 0.0,
        }
        .apply_lock()
    }
}

/// Single-field mutation of [`SimulationParameters`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterUpdate {
    /// Sets `L`.
    Length(Scalar),
    /// Sets `B`.
    FieldStrength(Scalar),
    /// Sets `k`.
    VoltageMultiplier(Scalar),
    /// Sets `H`.
    Height(Scalar),
    /// Sets `m`.
    Mass(Scalar),
    /// Sets `q`.
    Charge(Scalar),
    /// Selects the particle variant.
    ParticleVariant(ParticleVariant),
    /// Toggles the deflection voltage lock.
    LockDeflectionVoltage(bool),
    /// Sets `UNM`; ignored while the lock is engaged.
    DeflectionVoltage(Scalar),
}

impl SimulationParameters {
    /// `U0 = q·B²·L² / (8·max(|m|, ε))`.
    #[must_use]
    pub fn reference_voltage(&self) -> Scalar {
        let b = self.field_strength;
        let l = self.length;
        self.charge * b * b * l * l / (8.0 * floored_magnitude(self.mass))
    }

    /// `U = k·U0`.
    #[must_use]
    pub fn operating_voltage(&self) -> Scalar {
        self.voltage_multiplier * self.reference_voltage()
    }

    /// Charge-to-mass ratio of `variant`, with the mass floored to ε.
    #[must_use]
    pub fn charge_to_mass_ratio(&self, variant: ParticleVariant) -> Scalar {
        self.charge / floored_magnitude(self.mass) * variant.ratio_scale()
    }

    /// Effective strip thickness `max(|H|, ε)`.
    #[must_use]
    pub fn effective_height(&self) -> Scalar {
        floored_magnitude(self.height)
    }

    /// Deflection voltage the lock would impose: `round(0.75·U, 2)`.
    #[must_use]
    pub fn locked_deflection_voltage(&self) -> Scalar {
        round_to(
            LOCKED_DEFLECTION_RATIO * self.operating_voltage(),
            LOCKED_DEFLECTION_DECIMALS,
        )
    }

    /// Re-establishes the lock invariant; a no-op when the lock is disengaged.
    #[must_use]
    pub fn apply_lock(mut self) -> Self {
        if self.lock_deflection_voltage {
            self.deflection_voltage = self.locked_deflection_voltage();
        }
        self
    }

    /// Applies one field mutation and renormalizes the locked deflection voltage.
    #[must_use]
    pub fn apply(mut self, update: ParameterUpdate) -> Self {
        match update {
            ParameterUpdate::Length(v) => self.length = v,
            ParameterUpdate::FieldStrength(v) => self.field_strength = v,
            ParameterUpdate::VoltageMultiplier(v) => self.voltage_multiplier = v,
            ParameterUpdate::Height(v) => self.height = v,
            ParameterUpdate::Mass(v) => self.mass = v,
            ParameterUpdate::Charge(v) => self.charge = v,
            ParameterUpdate::ParticleVariant(v) => self.particle_variant = v,
            ParameterUpdate::LockDeflectionVoltage(v) => self.lock_deflection_voltage = v,
            ParameterUpdate::DeflectionVoltage(v) => self.deflection_voltage = v,
        }
        self.apply_lock()
    }

    /// Derived scalars shown next to the trajectory.
    #[must_use]
    pub fn derived(&self) -> DerivedQuantities {
        DerivedQuantities {
            reference_voltage: self.reference_voltage(),
            operating_voltage: self.operating_voltage(),
            deflection_voltage: self.apply_lock().deflection_voltage,
        }
    }

    /// Rejects non-finite inputs and a non-positive length scale.
    ///
    /// The engine itself never calls this; it is meant for whoever owns the
    /// parameter snapshot (for example the configuration loader).
    pub fn validate(&self) -> Result<(), SimulationError> {
        let fields = [
            ("length", self.length),
            ("field_strength", self.field_strength),
            ("voltage_multiplier", self.voltage_multiplier),
            ("height", self.height),
            ("mass", self.mass),
            ("charge", self.charge),
            ("deflection_voltage", self.deflection_voltage),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(SimulationError::NonFinite(name));
            }
        }
        if self.length <= 0.0 {
            return Err(SimulationError::InvalidConfig(
                "length must be > 0".into(),
            ));
        }
        Ok(())
    }
}

/// Scalars derived from a parameter snapshot, for display.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedQuantities {
    /// Reference voltage `U0`.
    pub reference_voltage: Scalar,
    /// Operating voltage `U`.
    pub operating_voltage: Scalar,
    /// Effective deflection voltage `UNM` after the lock is applied.
    pub deflection_voltage: Scalar,
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::constants::EPSILON;

    #[test]
    fn default_scenario_matches_reference_values() {
        let p = SimulationParameters::default();
        assert_relative_eq!(p.reference_voltage(), 0.08, epsilon = 1.0e-12);
        assert_relative_eq!(p.operating_voltage(), 0.08, epsilon = 1.0e-12);
        assert_relative_eq!(p.deflection_voltage, 0.06, epsilon = 1.0e-12);
    }

    #[test]
    fn variant_b_has_quarter_ratio() {
        let p = SimulationParameters { charge: 3.0, mass: 7.0, ..Default::default() };
        let a = p.charge_to_mass_ratio(ParticleVariant::A);
        let b = p.charge_to_mass_ratio(ParticleVariant::B);
        assert_eq!(b, a * 0.25);
    }

    #[test]
    fn zero_mass_is_floored() {
        let p = SimulationParameters { mass: 0.0, ..Default::default() };
        assert_relative_eq!(p.charge_to_mass_ratio(ParticleVariant::A), 1.0 / EPSILON);
        assert!(p.reference_voltage().is_finite());
    }

    #[test]
    fn negative_mass_uses_magnitude() {
        let p = SimulationParameters { mass: -2.0, ..Default::default() };
        assert_relative_eq!(p.charge_to_mass_ratio(ParticleVariant::A), 0.5);
    }

    #[test]
    fn unlocked_voltage_is_left_alone() {
        let p = SimulationParameters {
            lock_deflection_voltage: false,
            deflection_voltage: 4.2,
            ..Default::default()
        };
        assert_eq!(p.apply_lock().deflection_voltage, 4.2);
        let p = p.apply(ParameterUpdate::VoltageMultiplier(3.0));
        assert_eq!(p.deflection_voltage, 4.2);
    }

    #[test]
    fn locked_voltage_tracks_every_update() {
        let p = SimulationParameters::default()
            .apply(ParameterUpdate::VoltageMultiplier(2.0))
            .apply(ParameterUpdate::FieldStrength(1.0));
        // U0 = 1·1·1/8 = 0.125, U = 0.25, UNM = 0.1875 -> 0.19
        assert_relative_eq!(p.deflection_voltage, 0.19, epsilon = 1.0e-12);

        let p = p.apply(ParameterUpdate::DeflectionVoltage(9.0));
        assert_relative_eq!(p.deflection_voltage, 0.19, epsilon = 1.0e-12);
    }

    #[test]
    fn engaging_lock_recomputes_voltage() {
        let p = SimulationParameters {
            lock_deflection_voltage: false,
            deflection_voltage: 5.0,
            ..Default::default()
        };
        let p = p.apply(ParameterUpdate::LockDeflectionVoltage(true));
        assert_relative_eq!(p.deflection_voltage, 0.06, epsilon = 1.0e-12);
    }

    #[test]
    fn validate_rejects_non_finite() {
        let p = SimulationParameters { charge: f64::NAN, ..Default::default() };
        assert!(matches!(p.validate(), Err(SimulationError::NonFinite("charge"))));
        let p = SimulationParameters { length: 0.0, ..Default::default() };
        assert!(matches!(p.validate(), Err(SimulationError::InvalidConfig(_))));
        SimulationParameters::default().validate().expect("defaults are valid");
    }

    #[test]
    fn derived_reports_effective_voltage() {
        let d = SimulationParameters::default().derived();
        assert_relative_eq!(d.reference_voltage, 0.08, epsilon = 1.0e-12);
        assert_relative_eq!(d.deflection_voltage, 0.06, epsilon = 1.0e-12);
    }
}
