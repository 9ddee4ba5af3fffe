//! Peak-normalized logarithmic scaling.
//!
//! Every sample is divided by the largest absolute sample and mapped through
//! `factor * log10(|x|)`. With the default factor of 20 the result is an
//! amplitude level in dB relative to the peak, so the peak lands on 0 dB.
//!
//! A sample that is exactly zero has no finite level. By default this is
//! reported as [`Error::InvalidInput`]; [`LogScaler::with_floor_db`] clamps
//! such samples (and anything quieter than the floor) to the floor instead.

use crate::error::{Error, Result};
use crate::signal::Signal;

/// Default multiplier: amplitude dB.
pub const DEFAULT_FACTOR: f64 = 20.0;

/// Converts a signal to a peak-relative logarithmic scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogScaler {
    factor: f64,
    floor_db: Option<f64>,
}

impl Default for LogScaler {
    fn default() -> Self {
        Self::new(DEFAULT_FACTOR)
    }
}

impl LogScaler {
    /// Create a strict scaler with the given multiplier (20 for amplitude,
    /// 10 for energy).
    pub fn new(factor: f64) -> Self {
        Self {
            factor,
            floor_db: None,
        }
    }

    /// Clamp levels below `floor_db` (including silent samples) to `floor_db`
    /// instead of failing.
    pub fn with_floor_db(mut self, floor_db: f64) -> Self {
        self.floor_db = Some(floor_db);
        self
    }

    /// Multiplier applied to `log10`.
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Configured floor, if any.
    pub fn floor_db(&self) -> Option<f64> {
        self.floor_db
    }

    /// Scale raw samples. Output has the same length as the input.
    pub fn scale(&self, samples: &[f64]) -> Result<Vec<f64>> {
        if samples.is_empty() {
            return Err(Error::invalid_input("cannot log-scale an empty signal"));
        }
        if samples.iter().any(|s| !s.is_finite()) {
            return Err(Error::invalid_input("signal contains non-finite samples"));
        }

        let peak = samples.iter().fold(0.0f64, |acc, &s| acc.max(s.abs()));
        if peak == 0.0 {
            return Err(Error::invalid_input(
                "signal is silent (peak is zero), cannot normalize",
            ));
        }

        samples
            .iter()
            .enumerate()
            .map(|(i, &s)| {
                let magnitude = s.abs() / peak;
                match self.floor_db {
                    Some(floor) if magnitude == 0.0 => Ok(floor),
                    Some(floor) => Ok((self.factor * magnitude.log10()).max(floor)),
                    None if magnitude == 0.0 => Err(Error::invalid_input(format!(
                        "sample {} is zero, its logarithm is unbounded",
                        i
                    ))),
                    None => Ok(self.factor * magnitude.log10()),
                }
            })
            .collect()
    }

    /// Scale a [`Signal`].
    pub fn scale_signal(&self, signal: &Signal) -> Result<Vec<f64>> {
        self.scale(signal.samples())
    }
}
