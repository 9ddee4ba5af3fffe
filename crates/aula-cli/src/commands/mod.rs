//! CLI command implementations.

pub mod analyze;
pub mod bands;
pub mod common;
pub mod curves;
pub mod synth;
