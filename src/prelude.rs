//! Convenience re-exports for running deflection experiments.

#[cfg(feature = "config")]
pub use crate::config::{ConfigError, ExperimentConfig};
pub use crate::constants::*;
pub use crate::errors::IonDepositionError;
pub use crate::fields::{deflecting_field, magnetic_field, DeviceGeometry, Surface};
pub use crate::integrator::{rk4_step, AccelerationLaw, KinematicState, LorentzForce};
pub use crate::io::{write_impact_summary_csv, write_trajectory_csv};
pub use crate::math::{crosses_level, interpolate_crossing_x, round_to, Scalar, R2};
pub use crate::params::{DerivedQuantities, ParameterUpdate, ParticleVariant, SimulationParameters};
pub use crate::simulation::{
    simulate_variants,
    Impact,
    Outcome,
    SimulationConfig,
    SimulationEngine,
    SimulationError,
    TrajectoryPoint,
    TrajectoryResult,
    TrajectorySimulator,
    VariantResults,
};
pub use crate::sweep::{linspace, sweep_parameter, SweepSample};
