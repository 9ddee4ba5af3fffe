//! Integration tests for aula-analysis.
//!
//! Tests run the public pipeline end to end on synthetic impulse responses
//! whose decay is known in closed form.

use aula_analysis::octave::NOMINAL_CENTERS_HZ;
use aula_analysis::synth::{DEFAULT_T60_SECS, default_impulse_response};
use aula_analysis::{
    AcousticParameterEstimator, BandId, BandParameterAggregator, DecayWindow, OctaveBandFilter,
    Parameter, synthetic_impulse_response,
};
use aula_core::{Error, Signal};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const SAMPLE_RATE: u32 = 22050;

/// Bands two octaves apart so neighbours leak less than -50 dB.
const CENTERS: [f64; 3] = [250.0, 1000.0, 4000.0];
const T60S: [f64; 3] = [1.2, 0.8, 0.5];

fn three_band_ir() -> Signal {
    synthetic_impulse_response(&CENTERS, &T60S, 3.0, SAMPLE_RATE).unwrap()
}

/// `exp(-t / tau)` sampled at `sample_rate`.
fn exponential(tau: f64, sample_rate: u32, secs: f64) -> Signal {
    let n = (secs * f64::from(sample_rate)).round() as usize;
    Signal::new(
        (0..n)
            .map(|i| (-(i as f64) / f64::from(sample_rate) / tau).exp())
            .collect(),
        sample_rate,
    )
    .unwrap()
}

fn within(value: f64, target: f64, fraction: f64) -> bool {
    (value - target).abs() <= target * fraction
}

// ===========================================================================
// 1. End-to-end recovery
// ===========================================================================

#[test]
fn recovers_band_decay_times_from_synthetic_response() {
    let ir = three_band_ir();
    let table = BandParameterAggregator::default()
        .analyze_signal(&ir, 3.0, false)
        .unwrap();

    assert_eq!(table.len(), NOMINAL_CENTERS_HZ.len());

    for (center, t60) in CENTERS.iter().zip(T60S) {
        let entry = table.get(BandId::Octave(*center)).unwrap();
        let summary = entry
            .outcome
            .as_ref()
            .unwrap_or_else(|e| panic!("{} Hz failed: {}", center, e));
        let t20 = summary.parameters.t20;
        let t30 = summary.parameters.t30;
        assert!(within(t20, t60, 0.1), "{} Hz: T20 {} vs {}", center, t20, t60);
        assert!(within(t30, t60, 0.1), "{} Hz: T30 {} vs {}", center, t30, t60);
    }
}

#[test]
fn recovers_every_band_of_default_response() {
    // All ten nominal bands at 44.1 kHz with their default decay times
    let ir = default_impulse_response().unwrap();
    let table = BandParameterAggregator::default()
        .analyze_signal(&ir, 3.0, false)
        .unwrap();
    assert_eq!(table.failures().count(), 0);

    for (center, t60) in NOMINAL_CENTERS_HZ.iter().zip(DEFAULT_T60_SECS) {
        let summary = table
            .get(BandId::Octave(*center))
            .unwrap()
            .outcome
            .as_ref()
            .unwrap_or_else(|e| panic!("{} Hz failed: {}", center, e));
        for parameter in [Parameter::T20, Parameter::T30] {
            let value = summary.value(parameter).unwrap();
            assert!(
                within(value, t60, 0.1),
                "{} Hz: {} {} vs {}",
                center,
                parameter.label(),
                value,
                t60
            );
        }
    }
}

#[test]
fn exponential_round_trip_matches_tau() {
    // Energy decays 60 dB in ln(1000) * tau = 6.91 tau seconds
    let tau = 0.1;
    let signal = exponential(tau, 16000, 2.0);
    let params = AcousticParameterEstimator::default()
        .estimate(&signal, 2.0)
        .unwrap();

    let expected = 1000f64.ln() * tau;
    for window in DecayWindow::ALL {
        let value = params.get(window);
        assert!(
            within(value, expected, 0.01),
            "{}: {} vs {}",
            window.label(),
            value,
            expected
        );
    }
}

#[test]
fn broadband_column_comes_first() {
    let ir = three_band_ir();
    let table = BandParameterAggregator::default()
        .analyze_signal(&ir, 3.0, true)
        .unwrap();

    let bands: Vec<BandId> = table.bands().collect();
    assert_eq!(bands[0], BandId::Broadband);
    let centers: Vec<f64> = bands[1..].iter().filter_map(|b| b.center_hz()).collect();
    assert_eq!(centers, NOMINAL_CENTERS_HZ);
}

// ===========================================================================
// 2. Failure tagging
// ===========================================================================

#[test]
fn bands_above_nyquist_fail_alone() {
    let table = BandParameterAggregator::default()
        .analyze_signal(&three_band_ir(), 3.0, false)
        .unwrap();

    // At 22.05 kHz only the 16 kHz band collapses
    let failed: Vec<BandId> = table
        .failures()
        .filter(|(_, e)| matches!(e, Error::InvalidConfiguration(_)))
        .map(|(b, _)| b)
        .collect();
    assert_eq!(failed, vec![BandId::Octave(16000.0)]);

    for center in CENTERS {
        assert!(table.get(BandId::Octave(center)).unwrap().outcome.is_ok());
    }
    assert!(table.row(Parameter::T30)[9].is_none());
}

#[test]
fn limit_beyond_signal_fails_every_band_with_invalid_input() {
    let ir = three_band_ir();
    let table = BandParameterAggregator::default()
        .analyze_signal(&ir, 4.0, true)
        .unwrap();

    assert_eq!(table.successes().count(), 0);
    assert!(
        table
            .failures()
            .filter(|(b, _)| *b != BandId::Octave(16000.0))
            .all(|(_, e)| matches!(e, Error::InvalidInput(_)))
    );
}

// ===========================================================================
// 3. Determinism and intermediate curves
// ===========================================================================

#[test]
fn repeated_pipeline_runs_are_bit_identical() {
    let ir = three_band_ir();
    let aggregator = BandParameterAggregator::default();
    let first = aggregator.analyze_signal(&ir, 3.0, true).unwrap();
    let second = aggregator.analyze_signal(&ir, 3.0, true).unwrap();
    assert_eq!(first, second);
}

#[test]
fn split_then_aggregate_matches_analyze_signal() {
    let ir = three_band_ir();
    let filter = OctaveBandFilter::new(SAMPLE_RATE).unwrap();
    let bands: Vec<_> = CENTERS
        .iter()
        .map(|&c| filter.band(&ir, c).unwrap())
        .collect();

    let aggregator = BandParameterAggregator::default();
    let direct = aggregator.aggregate(&bands, 3.0);
    let full = aggregator.analyze_signal(&ir, 3.0, false).unwrap();

    for entry in direct.entries() {
        assert_eq!(Some(entry), full.get(entry.band));
    }
}

#[test]
fn intermediate_curves_are_exposed() {
    let ir = three_band_ir();
    let band = OctaveBandFilter::new(SAMPLE_RATE)
        .unwrap()
        .band(&ir, 1000.0)
        .unwrap();
    let analysis = AcousticParameterEstimator::default()
        .analyze(&band.signal, 2.0)
        .unwrap();

    let n = ir.len();
    assert_eq!(analysis.curves.signal_db.len(), n);
    assert_eq!(analysis.curves.smoothed_db.len(), n);
    assert_eq!(analysis.curves.schroeder.len(), 2 * SAMPLE_RATE as usize);
    assert!(analysis.curves.signal_db.level_db().iter().all(|v| *v <= 0.0 && *v >= -120.0));

    for window in DecayWindow::ALL {
        let fit = analysis.fits.get(window);
        assert!(fit.line.slope < 0.0, "{} slope", window.label());
    }
    assert!(analysis.energy.is_some());
}
