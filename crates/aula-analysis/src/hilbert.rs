//! Hilbert transform for computing analytic signals.
//!
//! The magnitude of the analytic signal is the instantaneous amplitude
//! envelope, which is what [`crate::envelope::EnvelopeSmoother`] averages.
//!
//! # Algorithm
//!
//! The transform is computed at the exact signal length `N` (no padding):
//! 1. Compute the FFT of the real signal
//! 2. Keep DC (and Nyquist, when `N` is even) unchanged
//! 3. Double the positive frequencies
//! 4. Zero the negative frequencies
//! 5. The inverse FFT is the analytic signal `x + i*H{x}`
//!
//! # Example
//!
//! ```rust
//! use aula_analysis::hilbert::HilbertTransform;
//! use std::f64::consts::PI;
//!
//! let signal: Vec<f64> = (0..1000)
//!     .map(|i| (2.0 * PI * 50.0 * i as f64 / 1000.0).sin())
//!     .collect();
//!
//! let envelope = HilbertTransform::new(signal.len()).envelope(&signal);
//! assert!((envelope[500] - 1.0).abs() < 1e-6);
//! ```

use crate::fft::Fft;
use rustfft::num_complex::Complex64;

/// Hilbert transform processor for one signal length.
pub struct HilbertTransform {
    fft: Fft,
}

impl HilbertTransform {
    /// Create a processor for signals of `len` samples.
    pub fn new(len: usize) -> Self {
        Self { fft: Fft::new(len) }
    }

    /// Signal length this processor was planned for.
    pub fn len(&self) -> usize {
        self.fft.size()
    }

    /// True when planned for zero-length signals.
    pub fn is_empty(&self) -> bool {
        self.fft.size() == 0
    }

    /// Compute the analytic signal.
    ///
    /// Input shorter than the planned length is zero-padded; longer input is
    /// truncated. The output has the planned length.
    pub fn analytic_signal(&self, signal: &[f64]) -> Vec<Complex64> {
        let n = self.fft.size();
        if n == 0 {
            return Vec::new();
        }

        let mut buffer: Vec<Complex64> = signal
            .iter()
            .take(n)
            .map(|&x| Complex64::new(x, 0.0))
            .collect();
        buffer.resize(n, Complex64::new(0.0, 0.0));

        self.fft.forward_complex(&mut buffer);

        // Bins 1..positive_end are doubled; an even N keeps its Nyquist bin.
        let positive_end = n.div_ceil(2);
        for bin in buffer.iter_mut().take(positive_end).skip(1) {
            *bin *= 2.0;
        }
        let negative_start = n / 2 + 1;
        for bin in buffer.iter_mut().skip(negative_start) {
            *bin = Complex64::new(0.0, 0.0);
        }

        self.fft.inverse_complex(&mut buffer);
        buffer
    }

    /// Instantaneous amplitude `|x + i*H{x}|` for each sample.
    pub fn envelope(&self, signal: &[f64]) -> Vec<f64> {
        self.analytic_signal(signal)
            .iter()
            .map(|c| c.norm())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sine(freq: f64, sample_rate: f64, n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| (2.0 * PI * freq * i as f64 / sample_rate).sin())
            .collect()
    }

    #[test]
    fn sine_maps_to_negative_cosine() {
        // Whole number of periods, so the FFT method is exact
        let n = 500;
        let signal = sine(10.0, 500.0, n);
        let analytic = HilbertTransform::new(n).analytic_signal(&signal);

        for (i, c) in analytic.iter().enumerate() {
            let expected_im = -(2.0 * PI * 10.0 * i as f64 / 500.0).cos();
            assert!((c.re - signal[i]).abs() < 1e-9);
            assert!((c.im - expected_im).abs() < 1e-9, "at {}", i);
        }
    }

    #[test]
    fn odd_length_is_exact() {
        let n = 501;
        let signal: Vec<f64> = (0..n)
            .map(|i| (2.0 * PI * 3.0 * i as f64 / n as f64).cos())
            .collect();
        let envelope = HilbertTransform::new(n).envelope(&signal);
        assert!(envelope.iter().all(|&a| (a - 1.0).abs() < 1e-9));
    }

    #[test]
    fn real_part_is_preserved() {
        let signal: Vec<f64> = (0..64).map(|i| ((i * 7) % 11) as f64 - 5.0).collect();
        let analytic = HilbertTransform::new(64).analytic_signal(&signal);
        for (c, &x) in analytic.iter().zip(&signal) {
            assert!((c.re - x).abs() < 1e-9);
        }
    }

    #[test]
    fn envelope_tracks_modulation() {
        let n = 1000;
        let signal: Vec<f64> = (0..n)
            .map(|i| {
                let t = i as f64 / 1000.0;
                (0.5 + 0.4 * (2.0 * PI * 2.0 * t).cos()) * (2.0 * PI * 100.0 * t).sin()
            })
            .collect();
        let envelope = HilbertTransform::new(n).envelope(&signal);
        // Envelope at t = 0.25 s (modulator trough) and t = 0.5 s (crest)
        assert!((envelope[250] - 0.1).abs() < 0.01);
        assert!((envelope[500] - 0.9).abs() < 0.01);
    }

    #[test]
    fn empty_signal() {
        let hilbert = HilbertTransform::new(0);
        assert!(hilbert.is_empty());
        assert!(hilbert.analytic_signal(&[]).is_empty());
    }
}
