//! Mono sample buffer with an attached sample rate.

use crate::error::{Error, Result};

/// An ordered, non-empty sequence of samples at a known sample rate.
///
/// The sample rate travels with the samples so no stage of the pipeline has
/// to assume one.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    samples: Vec<f64>,
    sample_rate: u32,
}

impl Signal {
    /// Create a signal, rejecting empty buffers and a zero sample rate.
    pub fn new(samples: Vec<f64>, sample_rate: u32) -> Result<Self> {
        if samples.is_empty() {
            return Err(Error::invalid_input("signal has no samples"));
        }
        if sample_rate == 0 {
            return Err(Error::invalid_input("sample rate must be positive"));
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Sample values.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Nyquist frequency in Hz.
    pub fn nyquist(&self) -> f64 {
        f64::from(self.sample_rate) / 2.0
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds (`len / sample_rate`).
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> f64 {
        self.samples.iter().fold(0.0f64, |acc, &s| acc.max(s.abs()))
    }

    /// Time axis spanning `[0, duration]` with one point per sample.
    pub fn time_axis(&self) -> Vec<f64> {
        linspace(0.0, self.duration_secs(), self.samples.len())
    }

    /// Build a new signal at the same rate with different samples.
    pub fn with_samples(&self, samples: Vec<f64>) -> Result<Self> {
        Self::new(samples, self.sample_rate)
    }
}

/// `num` evenly spaced points over `[start, stop]`, endpoint included.
///
/// A single point yields `[start]`; zero points yield an empty vector.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            (0..num).map(|i| start + step * i as f64).collect()
        }
    }
}
