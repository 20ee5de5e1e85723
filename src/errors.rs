//! Shared error types used across submodules.

use thiserror::Error;

#[cfg(feature = "config")]
use crate::config::ConfigError;
use crate::simulation::SimulationError;

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum IonDepositionError {
    /// Wraps simulation-related errors.
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    /// Wraps experiment file errors.
    #[cfg(feature = "config")]
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Raised when exporting results fails.
    #[error("export error: {0}")]
    Export(#[from] std::io::Error),
}
