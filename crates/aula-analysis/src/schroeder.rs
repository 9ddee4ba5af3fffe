//! Energy Decay Curve (Schroeder backward integration).
//!
//! The squared impulse response is truncated at the integration limit,
//! integrated from the limit back towards time zero, and expressed in dB
//! relative to the energy of the whole truncated window:
//!
//! ```text
//! EDC(t) = 10 log10( sum_{k=t}^{L-1} h[k]^2 / sum_{k=0}^{L-1} h[k]^2 )
//! ```
//!
//! The first value is therefore exactly 0 dB. Energy ratios are floored at
//! [`ENERGY_FLOOR`] so trailing digital silence yields -120 dB rather than
//! negative infinity.

use aula_core::{Error, Result, Signal};

/// Smallest energy ratio represented on the curve (-120 dB).
pub const ENERGY_FLOOR: f64 = 1e-12;

/// Slack, in samples, before a limit counts as running past the signal.
const LIMIT_SLACK_SAMPLES: f64 = 1e-6;

/// Backward integrator with an integration limit in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchroederIntegrator {
    limit_secs: f64,
}

impl SchroederIntegrator {
    /// Create an integrator that truncates the response at `limit_secs`.
    pub fn new(limit_secs: f64) -> Result<Self> {
        if !(limit_secs.is_finite() && limit_secs > 0.0) {
            return Err(Error::invalid_input(format!(
                "integration limit must be positive, got {} s",
                limit_secs
            )));
        }
        Ok(Self { limit_secs })
    }

    /// Integration limit in seconds.
    pub fn limit_secs(&self) -> f64 {
        self.limit_secs
    }

    /// Number of samples in the truncated window at `sample_rate`.
    pub fn window_len(&self, sample_rate: u32) -> usize {
        (self.limit_secs * f64::from(sample_rate)).round() as usize
    }

    /// Decay curve in dB, one value per sample of the truncated window.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] when the limit reaches past the end of the
    /// signal (even by a fraction of a sample), the window rounds to zero
    /// samples, or it holds no energy.
    pub fn integrate(&self, signal: &Signal) -> Result<Vec<f64>> {
        let exact = self.limit_secs * f64::from(signal.sample_rate());
        if exact > signal.len() as f64 + LIMIT_SLACK_SAMPLES {
            return Err(Error::invalid_input(format!(
                "integration limit {} s ({:.1} samples) exceeds signal length ({} samples)",
                self.limit_secs,
                exact,
                signal.len()
            )));
        }

        let len = self.window_len(signal.sample_rate());
        if len == 0 {
            return Err(Error::invalid_input(format!(
                "integration limit {} s is shorter than one sample",
                self.limit_secs
            )));
        }

        let window = &signal.samples()[..len];

        let mut edc = Vec::with_capacity(len);
        let mut sum = 0.0f64;
        for &s in window.iter().rev() {
            sum += s * s;
            edc.push(sum);
        }
        edc.reverse();

        let total = edc[0];
        if total == 0.0 {
            return Err(Error::invalid_input(
                "no energy inside the integration window",
            ));
        }

        Ok(edc
            .iter()
            .map(|&e| 10.0 * (e / total).max(ENERGY_FLOOR).log10())
            .collect())
    }
}
