//! Parameter sweep utilities.
//!
//! Fixed-step integration makes plate-crossing geometry reproducible across a
//! sweep, so impact positions can be compared point by point.

use rayon::prelude::*;

use crate::math::Scalar;
use crate::params::{ParameterUpdate, ParticleVariant, SimulationParameters};
use crate::simulation::{Impact, Outcome, SimulationEngine};

/// Generates `n` linearly spaced samples in [start, stop].
#[must_use]
pub fn linspace(start: Scalar, stop: Scalar, n: usize) -> Vec<Scalar> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as Scalar - 1.0);
            (0..n).map(|i| start + step * i as Scalar).collect()
        }
    }
}

/// Impact of one sweep sample.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepSample {
    /// Swept parameter value.
    pub value: Scalar,
    /// Terminal point of the trajectory.
    pub impact: Impact,
    /// How the trajectory terminated.
    pub outcome: Outcome,
}

/// Simulates `variant` once per value, building each parameter set by applying
/// `update(value)` to `base`.
///
/// Updates go through [`SimulationParameters::apply`], so the locked deflection
/// voltage follows the swept parameter. Samples are computed in parallel and
/// returned in input order.
#[must_use]
pub fn sweep_parameter<E, I, F>(
    engine: &E,
    base: &SimulationParameters,
    variant: ParticleVariant,
    values: I,
    update: F,
) -> Vec<SweepSample>
where
    E: SimulationEngine + Sync,
    I: IntoIterator<Item = Scalar>,
    F: Fn(Scalar) -> ParameterUpdate + Sync,
{
    let values: Vec<Scalar> = values.into_iter().collect();
    values
        .par_iter()
        .map(|&value| {
            let params = base.apply(update(value));
            let result = engine.simulate(&params, variant);
            SweepSample { value, impact: result.impact, outcome: result.outcome }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::simulation::TrajectorySimulator;

    #[test]
    fn linspace_basic() {
        let v = linspace(0.0, 1.0, 5);
        assert_eq!(v, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
    }

    #[test]
    fn top_plate_impact_follows_sqrt_k() {
        // The first arc closes at x = sqrt(k)·L.
        let samples = sweep_parameter(
            &TrajectorySimulator::default(),
            &SimulationParameters::default(),
            ParticleVariant::A,
            [1.44, 2.25, 3.24],
            ParameterUpdate::VoltageMultiplier,
        );
        assert_eq!(samples.len(), 3);
        for s in &samples {
            assert_eq!(s.outcome, Outcome::HitTop);
            assert_relative_eq!(s.impact.x, s.value.sqrt(), epsilon = 1.0e-4);
        }
        assert_eq!(samples[1].value, 2.25);
    }
}
