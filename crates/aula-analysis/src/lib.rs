//! Aula Analysis - ISO 3382 room-acoustic parameters from impulse responses
//!
//! This crate turns a measured (or synthetic) impulse response into decay
//! times per octave band:
//!
//! - [`octave`] - Butterworth octave-band splitting at the nominal centers
//! - [`hilbert`] - Hilbert transform for the analytic-signal envelope
//! - [`envelope`] - Moving-average smoothing of the envelope
//! - [`schroeder`] - Backward-integrated energy decay curve
//! - [`decay`] - Decay curves and EDT/T10/T20/T30 window selection
//! - [`estimator`] - The per-signal estimation pipeline
//! - [`energy`] - Clarity (C80) and definition (D50)
//! - [`aggregate`] - Per-band tables with per-band failures
//! - [`synth`] - Synthetic responses with known decay per band
//! - [`fft`] - FFT wrapper used by the Hilbert transform
//!
//! ## Example Workflow
//!
//! ```rust,ignore
//! use aula_analysis::{BandParameterAggregator, Parameter};
//!
//! // 1. Load or synthesize an impulse response
//! let ir = aula_analysis::synth::default_impulse_response()?;
//!
//! // 2. Estimate every band (broadband column first)
//! let table = BandParameterAggregator::default().analyze_signal(&ir, 3.0, true)?;
//!
//! // 3. Read a row
//! for (band, t30) in table.bands().zip(table.row(Parameter::T30)) {
//!     println!("{band}: {t30:?}");
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` - estimate bands concurrently on the rayon pool

pub mod aggregate;
pub mod decay;
pub mod energy;
pub mod envelope;
pub mod estimator;
pub mod fft;
pub mod hilbert;
pub mod octave;
pub mod schroeder;
pub mod synth;

pub use aggregate::{
    BandEntry, BandId, BandParameterAggregator, BandSummary, Parameter, ParameterTable,
};
pub use decay::{DecayCurve, DecaySegmentSelector, DecayWindow};
pub use energy::EnergyRatios;
pub use envelope::EnvelopeSmoother;
pub use estimator::{
    AcousticParameterEstimator, AcousticParameters, DecayAnalysis, EstimatorSettings,
};
pub use hilbert::HilbertTransform;
pub use octave::{BandEdges, OctaveBand, OctaveBandFilter};
pub use schroeder::SchroederIntegrator;
pub use synth::synthetic_impulse_response;
