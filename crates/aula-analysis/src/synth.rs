//! Synthetic impulse responses with known per-band decay.
//!
//! Each band contributes an exponentially decaying cosine at its center
//! frequency whose amplitude falls 60 dB over the band's T60:
//!
//! ```text
//! y(t) = sum_i exp(tau_i t) cos(2 pi f_i t),   tau_i = ln(10^-3) / T60_i
//! ```
//!
//! The sum is normalized to a unit absolute peak.

use crate::octave::NOMINAL_CENTERS_HZ;
use aula_core::{Error, Result, Signal};
use std::f64::consts::PI;

/// Default T60 per nominal band, in seconds.
pub const DEFAULT_T60_SECS: [f64; 10] = [
    2.67, 1.58, 1.42, 1.07, 1.11, 1.12, 1.03, 0.86, 0.63, 1.95,
];

/// Default length of a synthetic response in seconds.
pub const DEFAULT_DURATION_SECS: f64 = 6.0;

/// Default sample rate of a synthetic response.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Build a synthetic impulse response.
///
/// # Errors
///
/// [`Error::InvalidInput`] when the lists are empty or differ in length, a
/// T60 is not positive, or the duration rounds to zero samples.
pub fn synthetic_impulse_response(
    centers_hz: &[f64],
    t60_secs: &[f64],
    duration_secs: f64,
    sample_rate: u32,
) -> Result<Signal> {
    if centers_hz.is_empty() {
        return Err(Error::invalid_input("no bands to synthesize"));
    }
    if centers_hz.len() != t60_secs.len() {
        return Err(Error::invalid_input(format!(
            "{} band centers but {} decay times",
            centers_hz.len(),
            t60_secs.len()
        )));
    }
    if let Some(bad) = t60_secs.iter().find(|t| !(t.is_finite() && **t > 0.0)) {
        return Err(Error::invalid_input(format!(
            "decay time must be positive, got {} s",
            bad
        )));
    }

    let fs = f64::from(sample_rate);
    let len = (duration_secs * fs).round();
    if !(len.is_finite() && len >= 1.0) {
        return Err(Error::invalid_input(format!(
            "duration {} s at {} Hz holds no samples",
            duration_secs, sample_rate
        )));
    }

    let rates: Vec<f64> = t60_secs.iter().map(|t60| 1e-3f64.ln() / t60).collect();
    let mut samples: Vec<f64> = (0..len as usize)
        .map(|i| {
            let t = i as f64 / fs;
            centers_hz
                .iter()
                .zip(&rates)
                .map(|(f, tau)| (tau * t).exp() * (2.0 * PI * f * t).cos())
                .sum()
        })
        .collect();

    let peak = samples.iter().fold(0.0f64, |m, x| m.max(x.abs()));
    if peak > 0.0 {
        for s in &mut samples {
            *s /= peak;
        }
    }

    Signal::new(samples, sample_rate)
}

/// The default response: every nominal band with [`DEFAULT_T60_SECS`].
pub fn default_impulse_response() -> Result<Signal> {
    synthetic_impulse_response(
        &NOMINAL_CENTERS_HZ,
        &DEFAULT_T60_SECS,
        DEFAULT_DURATION_SECS,
        DEFAULT_SAMPLE_RATE,
    )
}
