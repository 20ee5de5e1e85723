//! TOML experiment files.
//!
//! An experiment file has two optional tables, `[parameters]` and
//! `[simulation]`; missing keys fall back to the library defaults:
//!
//! ```toml
//! [parameters]
//! length = 1.0
//! field_strength = 0.8
//! voltage_multiplier = 2.25
//! particle_variant = "b"
//!
//! [simulation]
//! time_step = 0.002
//! max_steps = 20000
//! ```

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::params::SimulationParameters;
use crate::simulation::{SimulationConfig, SimulationError, TrajectorySimulator};

/// Errors raised while loading an experiment file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read experiment file: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid TOML for an experiment.
    #[error("failed to parse experiment file: {0}")]
    Parse(#[from] toml::de::Error),
    /// The file parsed but describes an invalid experiment.
    #[error(transparent)]
    Invalid(#[from] SimulationError),
}

/// Parameter snapshot plus integration settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Device and particle parameters.
    pub parameters: SimulationParameters,
    /// Integrator settings.
    pub simulation: SimulationConfig,
}

impl ExperimentConfig {
    /// Parses, validates and normalizes an experiment from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.parameters.validate()?;
        config.simulation.validate()?;
        Ok(Self {
            parameters: config.parameters.apply_lock(),
            simulation: config.simulation,
        })
    }

    /// Loads an experiment from a TOML file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        info!("loaded experiment from {}", path.display());
        Ok(config)
    }

    /// Serializes the experiment back to TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Simulator configured with this experiment's integrator settings.
    #[must_use]
    pub fn simulator(&self) -> TrajectorySimulator {
        TrajectorySimulator::new(self.simulation)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::params::ParticleVariant;

    #[test]
    fn empty_file_uses_defaults() {
        let config = ExperimentConfig::from_toml_str("").expect("empty config");
        assert_eq!(config, ExperimentConfig::default());
        assert_relative_eq!(config.parameters.deflection_voltage, 0.06, epsilon = 1.0e-12);
    }

    #[test]
    fn partial_file_is_normalized_through_lock() {
        let config = ExperimentConfig::from_toml_str(
            r#"
            [parameters]
            voltage_multiplier = 2.25
            particle_variant = "b"
            deflection_voltage = 50.0

            [simulation]
            max_steps = 500
            "#,
        )
        .expect("valid config");
        assert_eq!(config.parameters.particle_variant, ParticleVariant::B);
        assert_relative_eq!(config.parameters.deflection_voltage, 0.14, epsilon = 1.0e-12);
        assert_eq!(config.simulation.max_steps, 500);
        assert_relative_eq!(config.simulation.time_step, 0.002);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = ExperimentConfig::from_toml_str("[simulation]\ntime_step = -1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(SimulationError::InvalidConfig(_))));
        let err = ExperimentConfig::from_toml_str("[parameters]\nlength = \"long\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        let err = ExperimentConfig::from_toml_str("[parameters]\nmass = nan\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(SimulationError::NonFinite("mass"))));
    }

    #[test]
    fn serialized_experiment_loads_back() {
        let config = ExperimentConfig::from_toml_str("[parameters]\nheight = 0.4\n")
            .expect("valid config");
        let text = config.to_toml_string().expect("serialize");
        assert_eq!(ExperimentConfig::from_toml_str(&text).expect("reload"), config);
    }

    #[test]
    fn missing_file_reports_io_error() {
        let err = ExperimentConfig::load_from_file("/nonexistent/experiment.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
