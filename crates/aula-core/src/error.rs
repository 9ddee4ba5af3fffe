//! Error taxonomy for the estimation pipeline.

use thiserror::Error;

/// Errors raised by any stage of the acoustic-parameter pipeline.
///
/// Errors are cheap to clone so a per-band failure can be stored in a result
/// table next to the bands that succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed or degenerate numeric input (empty signal, zero variance,
    /// zero energy, window larger than the signal).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Filter band parameters incompatible with the sample rate.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A requested decay-curve threshold cannot be located.
    #[error("empty result: {0}")]
    EmptyResult(String),
}

impl Error {
    /// Create an invalid input error.
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Error::InvalidInput(reason.into())
    }

    /// Create an invalid configuration error.
    pub fn invalid_configuration(reason: impl Into<String>) -> Self {
        Error::InvalidConfiguration(reason.into())
    }

    /// Create an empty result error.
    pub fn empty_result(reason: impl Into<String>) -> Self {
        Error::EmptyResult(reason.into())
    }
}

/// Convenience result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
