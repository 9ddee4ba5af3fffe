//! Digital Butterworth band-pass design.
//!
//! # Algorithm
//!
//! 1. Pre-warp both cutoffs for the bilinear transform:
//!    `W = 2 fs tan(pi f / fs)`
//! 2. Place the `N` analog Butterworth low-pass prototype poles on the unit
//!    circle in the left half-plane
//! 3. Map each prototype pole `p` to the two band-pass poles solving
//!    `s^2 - p B s + W0^2 = 0`, with `B = W2 - W1` and `W0^2 = W1 W2`
//! 4. Bilinear-transform every pole: `z = (2 fs + s) / (2 fs - s)`
//! 5. Group conjugate poles into `N` second-order sections; each section
//!    takes one zero at DC and one at Nyquist
//! 6. Normalize each section to unity gain at the digital image of `W0`
//!
//! The result is a band-pass of total order `2N` whose magnitude is exactly
//! 0 dB at the (warped) geometric center and -3 dB at both cutoffs.

use crate::biquad::Biquad;
use crate::error::{Error, Result};
use rustfft::num_complex::Complex64;
use std::f64::consts::PI;

/// A designed band-pass filter: cutoffs plus its cascade of sections.
#[derive(Debug, Clone, PartialEq)]
pub struct BandpassDesign {
    low_hz: f64,
    high_hz: f64,
    sample_rate: f64,
    sections: Vec<Biquad>,
}

impl BandpassDesign {
    /// Design an order-`order` Butterworth band-pass (`2 * order` poles).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfiguration`] unless
    /// `0 < low_hz < high_hz < sample_rate / 2` and `order >= 1`.
    pub fn butterworth(order: usize, low_hz: f64, high_hz: f64, sample_rate: f64) -> Result<Self> {
        if order == 0 {
            return Err(Error::invalid_configuration("filter order must be at least 1"));
        }
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(Error::invalid_configuration(format!(
                "sample rate {} Hz is not positive",
                sample_rate
            )));
        }
        let nyquist = sample_rate / 2.0;
        if !(low_hz > 0.0 && low_hz < high_hz && high_hz < nyquist) {
            return Err(Error::invalid_configuration(format!(
                "band {:.2}-{:.2} Hz is not inside (0, {:.1}) Hz",
                low_hz, high_hz, nyquist
            )));
        }

        let fs2 = 2.0 * sample_rate;
        let w1 = fs2 * (PI * low_hz / sample_rate).tan();
        let w2 = fs2 * (PI * high_hz / sample_rate).tan();
        let half_bw = (w2 - w1) / 2.0;
        let w0_sq = w1 * w2;
        let center_omega = 2.0 * (w0_sq.sqrt() / fs2).atan();

        let bilinear = |s: Complex64| (fs2 + s) / (fs2 - s);
        let lowpass_to_bandpass = |p: Complex64| {
            let pb = p * half_bw;
            let disc = (pb * pb - w0_sq).sqrt();
            (pb + disc, pb - disc)
        };

        let mut sections = Vec::with_capacity(order);

        // Upper-half-plane prototype poles; their conjugates are implied.
        for k in 0..order / 2 {
            let theta = PI * (2 * k + order + 1) as f64 / (2 * order) as f64;
            let (s1, s2) = lowpass_to_bandpass(Complex64::from_polar(1.0, theta));
            for s in [s1, s2] {
                let z = bilinear(s);
                sections.push(Biquad::from_coefficients(
                    [1.0, 0.0, -1.0],
                    [1.0, -2.0 * z.re, z.norm_sqr()],
                ));
            }
        }

        // Odd orders carry a real prototype pole at -1.
        if order % 2 == 1 {
            let (s1, s2) = lowpass_to_bandpass(Complex64::new(-1.0, 0.0));
            let (z1, z2) = (bilinear(s1), bilinear(s2));
            sections.push(Biquad::from_coefficients(
                [1.0, 0.0, -1.0],
                [1.0, -(z1 + z2).re, (z1 * z2).re],
            ));
        }

        for section in &mut sections {
            let gain = section.response(center_omega).norm();
            section.scale_gain(1.0 / gain);
        }

        Ok(Self {
            low_hz,
            high_hz,
            sample_rate,
            sections,
        })
    }

    /// Lower -3 dB cutoff in Hz.
    pub fn low_hz(&self) -> f64 {
        self.low_hz
    }

    /// Upper -3 dB cutoff in Hz.
    pub fn high_hz(&self) -> f64 {
        self.high_hz
    }

    /// Sample rate the filter was designed for.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Cascaded second-order sections, in processing order.
    pub fn sections(&self) -> &[Biquad] {
        &self.sections
    }

    /// Filter a whole buffer from a zeroed state. Output length equals input
    /// length.
    pub fn filter(&self, input: &[f64]) -> Vec<f64> {
        let mut sections = self.sections.clone();
        input
            .iter()
            .map(|&x| sections.iter_mut().fold(x, |acc, s| s.process(acc)))
            .collect()
    }

    /// Magnitude response (linear) at `freq_hz`.
    pub fn magnitude_at(&self, freq_hz: f64) -> f64 {
        let omega = 2.0 * PI * freq_hz / self.sample_rate;
        self.sections
            .iter()
            .map(|s| s.response(omega).norm())
            .product()
    }
}
