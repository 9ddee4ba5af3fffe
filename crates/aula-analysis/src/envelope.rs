//! Hilbert-envelope smoothing.
//!
//! The analytic-signal magnitude of an impulse response is averaged over a
//! forward-looking rectangular window. Position `i` of the output is the mean
//! of the envelope over `[i, i + w)`; the last `w - 1` positions repeat the
//! final full-window mean so the output length equals the input length.

use crate::hilbert::HilbertTransform;
use aula_core::{Error, Result, Signal};

/// Default moving-average window, in samples.
pub const DEFAULT_WINDOW: usize = 1000;

/// Moving-average smoother over the Hilbert envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeSmoother {
    window: usize,
}

impl Default for EnvelopeSmoother {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
        }
    }
}

impl EnvelopeSmoother {
    /// Create a smoother with a window of `window` samples (at least 1).
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(Error::invalid_input("smoothing window must be at least 1"));
        }
        Ok(Self { window })
    }

    /// Window length in samples.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Smoothed envelope of `signal`, same length as the input.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] when the window is longer than the signal.
    pub fn smooth(&self, signal: &Signal) -> Result<Vec<f64>> {
        let samples = signal.samples();
        if self.window > samples.len() {
            return Err(Error::invalid_input(format!(
                "smoothing window ({}) exceeds signal length ({})",
                self.window,
                samples.len()
            )));
        }

        let envelope = HilbertTransform::new(samples.len()).envelope(samples);
        Ok(moving_average(&envelope, self.window))
    }
}

/// Forward moving average with tail padding. `window` must be in
/// `1..=values.len()`.
fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let full = values.len() + 1 - window;
    let scale = 1.0 / window as f64;
    let mut out = Vec::with_capacity(values.len());

    let mut sum = 0.0;
    for i in 0..full {
        // Fresh sum every `window` steps; rounding stays relative to the
        // current level.
        if i % window == 0 {
            sum = values[i..i + window].iter().sum();
        } else {
            sum += values[i + window - 1] - values[i - 1];
        }
        out.push(sum * scale);
    }

    let last = out[full - 1];
    out.resize(values.len(), last);
    out
}
