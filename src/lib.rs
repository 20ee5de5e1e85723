#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Numeric tolerances, reference step settings and device geometry multiples.
pub mod constants;
/// Shared mathematical utilities (vector aliases, rounding, interpolation).
pub mod math;
/// Simulation parameters and the quantities derived from them.
pub mod params;
/// Piecewise magnetic and deflecting field model plus device geometry.
pub mod fields;
/// Fixed-step Runge-Kutta integration of the particle's equations of motion.
pub mod integrator;
/// Event detection and trajectory assembly.
pub mod simulation;
/// Parameter sweep builders.
pub mod sweep;
/// Trajectory export helpers.
pub mod io;
/// TOML experiment configuration.
#[cfg(feature = "config")]
pub mod config;
/// Error types shared between submodules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;
