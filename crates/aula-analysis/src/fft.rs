//! FFT wrapper with cached plans

use rustfft::{FftPlanner, num_complex::Complex64};
use std::sync::Arc;

/// FFT processor holding forward and inverse plans for one size.
///
/// Sizes need not be powers of two; rustfft picks mixed-radix or Bluestein
/// plans for arbitrary lengths so analytic signals can be computed at the
/// exact signal length.
pub struct Fft {
    fft: Arc<dyn rustfft::Fft<f64>>,
    ifft: Arc<dyn rustfft::Fft<f64>>,
    size: usize,
}

impl Fft {
    /// Create a new FFT processor for the given size
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        let ifft = planner.plan_fft_inverse(size);

        Self { fft, ifft, size }
    }

    /// Get FFT size
    pub fn size(&self) -> usize {
        self.size
    }

    /// Perform forward FFT on complex input (in-place)
    pub fn forward_complex(&self, buffer: &mut [Complex64]) {
        self.fft.process(buffer);
    }

    /// Perform inverse FFT on complex buffer (in-place), normalized by `1/N`
    pub fn inverse_complex(&self, buffer: &mut [Complex64]) {
        self.ifft.process(buffer);

        let scale = 1.0 / self.size as f64;
        for c in buffer.iter_mut() {
            *c *= scale;
        }
    }
}
