//! Early-to-late energy ratios (clarity C80, definition D50).
//!
//! Both are measured from the first sample of the signal:
//!
//! - `C80 = 10 log10(E[0, 80 ms) / E[80 ms, end))` in dB
//! - `D50 = E[0, 50 ms) / E[0, end)` as a ratio in `[0, 1]`

use aula_core::Signal;

/// Clarity boundary in seconds.
pub const CLARITY_BOUNDARY_SECS: f64 = 0.080;

/// Definition boundary in seconds.
pub const DEFINITION_BOUNDARY_SECS: f64 = 0.050;

/// Energy ratios of one signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyRatios {
    /// Clarity C80 in dB.
    pub c80_db: f64,
    /// Definition D50 (fraction of total energy in the first 50 ms).
    pub d50: f64,
}

impl EnergyRatios {
    /// Measure both ratios, or `None` when the signal is shorter than the
    /// 80 ms boundary or has no late (or no total) energy.
    pub fn measure(signal: &Signal) -> Option<Self> {
        Some(Self {
            c80_db: clarity_db(signal, CLARITY_BOUNDARY_SECS)?,
            d50: definition(signal, DEFINITION_BOUNDARY_SECS)?,
        })
    }
}

fn boundary_index(signal: &Signal, secs: f64) -> Option<usize> {
    let index = (secs * f64::from(signal.sample_rate())).round() as usize;
    (index < signal.len()).then_some(index)
}

fn energy(samples: &[f64]) -> f64 {
    samples.iter().map(|x| x * x).sum()
}

/// Early-to-late energy ratio in dB with the boundary at `secs`.
pub fn clarity_db(signal: &Signal, secs: f64) -> Option<f64> {
    let boundary = boundary_index(signal, secs)?;
    let (early, late) = signal.samples().split_at(boundary);
    let late = energy(late);
    if late <= 0.0 {
        return None;
    }
    Some(10.0 * (energy(early) / late).log10())
}

/// Early-to-total energy ratio with the boundary at `secs`.
pub fn definition(signal: &Signal, secs: f64) -> Option<f64> {
    let boundary = boundary_index(signal, secs)?;
    let total = energy(signal.samples());
    if total <= 0.0 {
        return None;
    }
    Some(energy(&signal.samples()[..boundary]) / total)
}
