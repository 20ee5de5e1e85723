//! Piecewise field model of the deflection device.
//!
//! Both field components are free functions of raw coordinates. They branch
//! only on the geometric predicates of the device and carry no memory of the
//! region evaluated last, since the integrator samples them at independent
//! sub-step positions.

mod electric;
pub mod geometry;
mod magnetic;

pub use electric::deflecting_field;
pub use geometry::{DeviceGeometry, Surface};
pub use magnetic::magnetic_field;
