//! File I/O for the Aula analysis pipeline.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_signal`] and [`write_signal`] for loading and
//!   saving impulse responses as mono [`Signal`](aula_core::Signal)s
//! - **Table export**: [`export_table_csv`] and [`export_table_json`] for
//!   per-band parameter tables
//! - **Curve export**: [`export_curves_csv`] for the intermediate decay
//!   curves and fitted lines of one band
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use aula_analysis::BandParameterAggregator;
//! use aula_io::{export_table_csv, read_signal};
//!
//! let ir = read_signal("impulse.wav")?;
//! let table = BandParameterAggregator::default().analyze_signal(&ir, 3.0, true)?;
//! export_table_csv(&table, "parameters.csv")?;
//! ```

mod export;
mod wav;

pub use export::{
    BandRecord, export_curves_csv, export_table_csv, export_table_json, table_records,
    write_curves_csv, write_table_csv,
};
pub use wav::{WavFormat, WavInfo, read_signal, read_wav_info, write_signal};

/// Error types for file I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The requested sample format is not supported.
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// The WAV file holds no samples.
    #[error("WAV file contains no samples")]
    EmptyFile,

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Loaded data was rejected by the analysis layer.
    #[error("Analysis error: {0}")]
    Analysis(#[from] aula_core::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for file I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
