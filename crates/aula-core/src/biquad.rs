//! Biquad (bi-quadratic) filter section.
//!
//! Second-order IIR stage used as the building block of the band-pass
//! cascades in [`crate::butterworth`]. Double precision throughout: the
//! lowest octave bands put poles very close to the unit circle.

use rustfft::num_complex::Complex64;

/// Second-order section coefficients and state.
///
/// Implements the Direct Form I structure:
/// ```text
/// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
///                - a1*y[n-1] - a2*y[n-2]
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Biquad {
    /// Feedforward coefficients
    b0: f64,
    b1: f64,
    b2: f64,

    /// Feedback coefficients (normalized so a0 = 1)
    a1: f64,
    a2: f64,

    /// Input delay line: x[n-1], x[n-2]
    x1: f64,
    x2: f64,

    /// Output delay line: y[n-1], y[n-2]
    y1: f64,
    y2: f64,
}

impl Biquad {
    /// Creates a passthrough section (`y[n] = x[n]`).
    pub fn new() -> Self {
        Self {
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Creates a section from coefficients, normalizing by `a0`.
    pub fn from_coefficients(b: [f64; 3], a: [f64; 3]) -> Self {
        let mut section = Self::new();
        section.set_coefficients(b[0], b[1], b[2], a[0], a[1], a[2]);
        section
    }

    /// Sets the section coefficients.
    ///
    /// Note: This function normalizes by a0 internally.
    pub fn set_coefficients(&mut self, b0: f64, b1: f64, b2: f64, a0: f64, a1: f64, a2: f64) {
        let a0_inv = 1.0 / a0;
        self.b0 = b0 * a0_inv;
        self.b1 = b1 * a0_inv;
        self.b2 = b2 * a0_inv;
        self.a1 = a1 * a0_inv;
        self.a2 = a2 * a0_inv;
    }

    /// Feedforward coefficients `[b0, b1, b2]`.
    pub fn numerator(&self) -> [f64; 3] {
        [self.b0, self.b1, self.b2]
    }

    /// Feedback coefficients `[1, a1, a2]`.
    pub fn denominator(&self) -> [f64; 3] {
        [1.0, self.a1, self.a2]
    }

    /// Multiply the feedforward coefficients by `gain`.
    pub fn scale_gain(&mut self, gain: f64) {
        self.b0 *= gain;
        self.b1 *= gain;
        self.b2 *= gain;
    }

    /// Processes a single sample.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let output = self.b0 * input + self.b1 * self.x1 + self.b2 * self.x2
            - self.a1 * self.y1
            - self.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    /// Complex frequency response at normalized angular frequency `omega`
    /// (radians per sample).
    pub fn response(&self, omega: f64) -> Complex64 {
        let z1 = Complex64::from_polar(1.0, -omega);
        let z2 = z1 * z1;
        let num = self.b0 + z1 * self.b1 + z2 * self.b2;
        let den = 1.0 + z1 * self.a1 + z2 * self.a2;
        num / den
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passthrough_by_default() {
        let mut section = Biquad::new();
        for x in [1.0, -0.5, 0.25] {
            assert_eq!(section.process(x), x);
        }
    }

    #[test]
    fn normalizes_by_a0() {
        let section = Biquad::from_coefficients([2.0, 0.0, 0.0], [2.0, 1.0, 0.0]);
        assert_eq!(section.numerator(), [1.0, 0.0, 0.0]);
        assert_eq!(section.denominator(), [1.0, 0.5, 0.0]);
    }

    #[test]
    fn one_pole_recursion() {
        // y[n] = x[n] + 0.5 y[n-1]
        let mut section = Biquad::from_coefficients([1.0, 0.0, 0.0], [1.0, -0.5, 0.0]);
        let out: Vec<f64> = [1.0, 0.0, 0.0, 0.0].iter().map(|&x| section.process(x)).collect();
        assert_eq!(out, vec![1.0, 0.5, 0.25, 0.125]);
    }

    #[test]
    fn response_of_differencer() {
        // b = [1, 0, -1] has zeros at DC and Nyquist
        let section = Biquad::from_coefficients([1.0, 0.0, -1.0], [1.0, 0.0, 0.0]);
        assert!(section.response(0.0).norm() < 1e-12);
        assert!(section.response(std::f64::consts::PI).norm() < 1e-12);
        assert!((section.response(std::f64::consts::FRAC_PI_2).norm() - 2.0).abs() < 1e-12);
    }
}
