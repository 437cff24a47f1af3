//! CLI library components for Compliance Compass.

pub mod interactive;
pub mod logging;
pub mod terminal;
