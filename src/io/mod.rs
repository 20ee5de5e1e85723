//! I/O helpers for exporting simulation data.

pub mod csv;

pub use csv::*;
