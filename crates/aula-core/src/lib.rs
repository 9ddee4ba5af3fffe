//! Aula Core - numeric primitives for room-acoustic analysis
//!
//! This crate holds the building blocks the ISO 3382 estimation pipeline in
//! `aula-analysis` is assembled from. Nothing here touches files or devices.
//!
//! # Data
//!
//! - [`Signal`] - Mono sample buffer tagged with its sample rate
//! - [`Error`] - The failure taxonomy shared by every pipeline stage
//!
//! # Level and Fitting
//!
//! - [`LogScaler`] - Peak-normalized logarithmic (dB) scaling
//! - [`LinearRegressor`] / [`RegressionLine`] - Closed-form least-squares line fit
//!
//! # Filters
//!
//! - [`Biquad`] - Second-order IIR section (Direct Form I, `f64`)
//! - [`BandpassDesign`] - Digital Butterworth band-pass as a cascade of sections
//!
//! # Example
//!
//! ```rust
//! use aula_core::{LinearRegressor, Signal};
//!
//! let signal = Signal::new(vec![1.0, 0.5, 0.25, 0.125], 4).unwrap();
//! let time = signal.time_axis();
//! let fit = LinearRegressor::fit(&time, &[0.0, -3.0, -6.0, -9.0]).unwrap();
//! assert!((fit.slope + 9.0).abs() < 1e-9);
//! ```

pub mod biquad;
pub mod butterworth;
pub mod error;
pub mod log_scale;
pub mod regression;
pub mod signal;

pub use biquad::Biquad;
pub use butterworth::BandpassDesign;
pub use error::{Error, Result};
pub use log_scale::LogScaler;
pub use regression::{LinearRegressor, RegressionLine};
pub use signal::{Signal, linspace};
