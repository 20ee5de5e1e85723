//! Event detection and trajectory assembly.
//!
//! [`TrajectorySimulator`] drives the RK4 integrator from the launch state,
//! samples every accepted step, and stops at the first plate strike or envelope
//! escape. Runs are deterministic and keep no state between calls.

use std::fmt;

use log::{debug, warn};

use crate::constants::{DEFAULT_MAX_STEPS, DEFAULT_TIME_STEP};
use crate::fields::{DeviceGeometry, Surface};
use crate::integrator::{rk4_step, KinematicState, LorentzForce};
use crate::math::{crosses_level, interpolate_crossing_x, Scalar};
use crate::params::{DerivedQuantities, ParticleVariant, SimulationParameters};

/// Integration settings shared by every run of a simulator.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Fixed RK4 step size.
    pub time_step: Scalar,
    /// Ceiling on integration steps before a run is reported as exhausted.
    pub max_steps: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_step: DEFAULT_TIME_STEP,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl SimulationConfig {
    /// Creates a validated configuration.
    pub fn new(time_step: Scalar, max_steps: usize) -> Result<Self, SimulationError> {
        let config = Self { time_step, max_steps };
        config.validate()?;
        Ok(config)
    }

    /// Checks that the step size is finite and positive and the ceiling nonzero.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(SimulationError::InvalidConfig("time_step must be > 0".into()));
        }
        if self.max_steps == 0 {
            return Err(SimulationError::InvalidConfig("max_steps must be > 0".into()));
        }
        Ok(())
    }
}

/// Errors that can occur while configuring simulations.
///
/// Running a simulation never fails; these only surface from validation.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// Raised when a parameter is NaN or infinite.
    #[error("parameter `{0}` must be finite")]
    NonFinite(&'static str),
    /// Raised when the configuration is internally inconsistent.
    #[error("configuration error: {0}")]
    InvalidConfig(String),
}

/// Terminal state of a trajectory run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Struck the top plate at `y = 0`.
    HitTop,
    /// Struck the bottom plate at `y = -H`.
    HitBottom,
    /// Left the escape envelope.
    Escaped,
    /// Ran out of integration steps without striking or escaping.
    Exhausted,
}

impl Outcome {
    /// True for the two plate strikes.
    #[must_use]
    pub const fn is_plate_hit(self) -> bool {
        matches!(self, Self::HitTop | Self::HitBottom)
    }
}

/// A sampled trajectory position.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryPoint {
    /// Horizontal position.
    pub x: Scalar,
    /// Vertical position.
    pub y: Scalar,
}

impl From<&KinematicState> for TrajectoryPoint {
    fn from(state: &KinematicState) -> Self {
        Self { x: state.x(), y: state.y() }
    }
}

/// Where the particle ended up.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    /// Horizontal coordinate of the terminal point.
    pub x: Scalar,
    /// Vertical coordinate of the terminal point.
    pub y: Scalar,
    /// Plate surface struck, or [`Surface::None`].
    pub surface: Surface,
    /// True when a plate was struck.
    pub on_plate: bool,
}

impl Impact {
    fn plate(x: Scalar, y: Scalar, surface: Surface) -> Self {
        Self { x, y, surface, on_plate: true }
    }

    fn free(state: &KinematicState) -> Self {
        Self {
            x: state.x(),
            y: state.y(),
            surface: Surface::None,
            on_plate: false,
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x={:.3} y={:.3} surface={} on_plate={}",
            self.x,
            self.y,
            self.surface,
            if self.on_plate { "yes" } else { "no" }
        )
    }
}

/// Complete result of one simulation call.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryResult {
    /// Sampled positions in traversal order.
    pub points: Vec<TrajectoryPoint>,
    /// Interpolated x of the first downward crossing of `y = 0`.
    pub entry_crossing_x: Option<Scalar>,
    /// Terminal point and surface.
    pub impact: Impact,
    /// How the run terminated.
    pub outcome: Outcome,
    /// Integration steps taken.
    pub steps: usize,
}

impl TrajectoryResult {
    /// Total sampled points.
    #[must_use]
    pub fn len(&self) -> usize { self.points.len() }

    /// True if no points were sampled.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.points.is_empty() }
}

/// Trait for trajectory engines.
pub trait SimulationEngine {
    /// Simulates `variant` under `params`.
    fn simulate(&self, params: &SimulationParameters, variant: ParticleVariant) -> TrajectoryResult;

    /// Simulates the variant selected in `params`.
    fn simulate_selected(&self, params: &SimulationParameters) -> TrajectoryResult {
        self.simulate(params, params.particle_variant)
    }
}

/// Fixed-step trajectory engine with plate and escape detection.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrajectorySimulator {
    config: SimulationConfig,
}

impl TrajectorySimulator {
    /// Creates a simulator from an already validated configuration.
    #[must_use]
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &SimulationConfig { &self.config }

    /// Tests one step for a plate crossing at `surface`.
    fn plate_crossing(
        geometry: &DeviceGeometry,
        prev: &KinematicState,
        next: &KinematicState,
        surface: Surface,
    ) -> Option<Impact> {
        let level = geometry.surface_level(surface)?;
        if !crosses_level(prev.y(), next.y(), level) {
            return None;
        }
        let x = interpolate_crossing_x(prev.x(), prev.y(), next.x(), next.y(), level);
        geometry.on_plate(x).then(|| Impact::plate(x, level, surface))
    }
}

impl SimulationEngine for TrajectorySimulator {
    fn simulate(
        &self,
        params: &SimulationParameters,
        variant: ParticleVariant,
    ) -> TrajectoryResult {
        let params = params.apply_lock();
        let law = LorentzForce::new(&params, variant);
        let geometry = DeviceGeometry::from_params(&params);
        let dt = self.config.time_step;

        let mut current = law.initial_state();
        let mut points = vec![TrajectoryPoint::from(&current)];
        let mut entry_crossing_x = None;
        let mut impact = Impact::free(&current);

        debug!(
            "simulating variant {variant}: v0={:.6}, qm={:.6}, dt={dt}",
            current.speed(),
            law.charge_to_mass()
        );

        for step in 1..=self.config.max_steps {
            let next = rk4_step(&law, &current, dt);
            points.push(TrajectoryPoint::from(&next));

            if entry_crossing_x.is_none() && current.y() > 0.0 && next.y() <= 0.0 {
                entry_crossing_x =
                    Some(interpolate_crossing_x(current.x(), current.y(), next.x(), next.y(), 0.0));
            }

            // Top is tested before bottom within the same step.
            let plates = [
                (Surface::Top, Outcome::HitTop),
                (Surface::Bottom, Outcome::HitBottom),
            ];
            for (surface, outcome) in plates {
                if let Some(hit) = Self::plate_crossing(&geometry, &current, &next, surface) {
                    points.push(TrajectoryPoint { x: hit.x, y: hit.y });
                    debug!("variant {variant} {outcome:?} after {step} steps: {hit}");
                    return TrajectoryResult {
                        points,
                        entry_crossing_x,
                        impact: hit,
                        outcome,
                        steps: step,
                    };
                }
            }

            if geometry.escaped(next.x(), next.y()) {
                let impact = Impact::free(&next);
                debug!("variant {variant} escaped after {step} steps: {impact}");
                return TrajectoryResult {
                    points,
                    entry_crossing_x,
                    impact,
                    outcome: Outcome::Escaped,
                    steps: step,
                };
            }

            current = next;
            impact = Impact::free(&current);
        }

        warn!(
            "variant {variant} exhausted {} steps without striking or escaping; \
             reporting last state",
            self.config.max_steps
        );
        TrajectoryResult {
            points,
            entry_crossing_x,
            impact,
            outcome: Outcome::Exhausted,
            steps: self.config.max_steps,
        }
    }
}

/// Trajectories of both particle variants under one parameter snapshot.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct VariantResults {
    /// Result for the reference variant.
    pub a: TrajectoryResult,
    /// Result for the quarter-ratio variant.
    pub b: TrajectoryResult,
    /// Derived scalars for display.
    pub derived: DerivedQuantities,
}

impl VariantResults {
    /// Result for `variant`.
    #[must_use]
    pub fn get(&self, variant: ParticleVariant) -> &TrajectoryResult {
        match variant {
            ParticleVariant::A => &self.a,
            ParticleVariant::B => &self.b,
        }
    }
}

/// Simulates both variants in parallel; the parameters are normalized through
/// the deflection-voltage lock first.
#[must_use]
pub fn simulate_variants<E>(engine: &E, params: &SimulationParameters) -> VariantResults
where
    E: SimulationEngine + Sync,
{
    let params = params.apply_lock();
    let (a, b) = rayon::join(
        || engine.simulate(&params, ParticleVariant::A),
        || engine.simulate(&params, ParticleVariant::B),
    );
    VariantResults { a, b, derived: params.derived() }
}
