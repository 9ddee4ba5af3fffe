//! Per-signal acoustic parameter estimation.
//!
//! The pipeline is fixed:
//!
//! 1. Smooth the Hilbert envelope ([`EnvelopeSmoother`])
//! 2. Integrate the energy decay curve up to the limit ([`SchroederIntegrator`])
//! 3. Log-scale the raw and smoothed signals for inspection ([`LogScaler`])
//! 4. Locate the EDT/T10/T20/T30 windows ([`DecaySegmentSelector`]), fit each
//!    with [`LinearRegressor`], and convert slopes with `-60 / slope`
//!
//! Nothing is plotted or printed. Every intermediate curve and fitted line is
//! returned in [`DecayAnalysis`] for an external visualizer.
//!
//! # Example
//!
//! ```rust
//! use aula_analysis::estimator::AcousticParameterEstimator;
//! use aula_core::Signal;
//!
//! // Exponential decay with a 1 s reverberation time
//! let fs = 8000;
//! let tau = 1.0 / 6.9078;
//! let samples = (0..2 * fs)
//!     .map(|i| (-(i as f64) / f64::from(fs) / tau).exp())
//!     .collect();
//! let signal = Signal::new(samples, fs).unwrap();
//!
//! let params = AcousticParameterEstimator::default()
//!     .estimate(&signal, 2.0)
//!     .unwrap();
//! assert!((params.t30 - 1.0).abs() < 0.01);
//! ```

use crate::decay::{DecayCurve, DecaySegmentSelector, DecayWindow};
use crate::energy::EnergyRatios;
use crate::envelope::{self, EnvelopeSmoother};
use crate::schroeder::SchroederIntegrator;
use aula_core::{LinearRegressor, LogScaler, RegressionLine, Result, Signal};
use std::ops::Range;

/// Tunable knobs of the estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatorSettings {
    /// Moving-average window over the Hilbert envelope, in samples.
    pub smoothing_window: usize,
    /// Multiplier for the display log scaling (20 = amplitude dB).
    pub log_scale_factor: f64,
    /// Floor applied to the display curves, in dB.
    pub log_floor_db: f64,
    /// Accepted distance between a window boundary and its target level.
    pub threshold_tolerance_db: f64,
}

impl Default for EstimatorSettings {
    fn default() -> Self {
        Self {
            smoothing_window: envelope::DEFAULT_WINDOW,
            log_scale_factor: aula_core::log_scale::DEFAULT_FACTOR,
            log_floor_db: -120.0,
            threshold_tolerance_db: crate::decay::DEFAULT_TOLERANCE_DB,
        }
    }
}

/// Decay times of one signal, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcousticParameters {
    /// Early decay time.
    pub edt: f64,
    /// Reverberation time from the -5/-15 dB window.
    pub t10: f64,
    /// Reverberation time from the -5/-25 dB window.
    pub t20: f64,
    /// Reverberation time from the -5/-35 dB window.
    pub t30: f64,
}

impl AcousticParameters {
    /// Decay time for `window`.
    pub fn get(&self, window: DecayWindow) -> f64 {
        match window {
            DecayWindow::Edt => self.edt,
            DecayWindow::T10 => self.t10,
            DecayWindow::T20 => self.t20,
            DecayWindow::T30 => self.t30,
        }
    }
}

/// A line fitted over one evaluation window of the Schroeder curve.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowFit {
    /// Which evaluation window.
    pub window: DecayWindow,
    /// Indices of the Schroeder curve used for the fit (end exclusive).
    pub range: Range<usize>,
    /// Fitted line, level in dB against time in seconds.
    pub line: RegressionLine,
    /// `-60 / slope` in seconds.
    pub decay_time: f64,
}

/// Every fitted line of one analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct DecayFits {
    /// Fit over the whole Schroeder curve.
    pub overall: RegressionLine,
    /// Fits in [`DecayWindow::ALL`] order.
    pub windows: [WindowFit; 4],
}

impl DecayFits {
    /// Fit for `window`.
    pub fn get(&self, window: DecayWindow) -> &WindowFit {
        match window {
            DecayWindow::Edt => &self.windows[0],
            DecayWindow::T10 => &self.windows[1],
            DecayWindow::T20 => &self.windows[2],
            DecayWindow::T30 => &self.windows[3],
        }
    }
}

/// Intermediate curves of one analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct DecayCurves {
    /// Raw signal, peak-normalized, in dB.
    pub signal_db: DecayCurve,
    /// Smoothed Hilbert envelope, peak-normalized, in dB.
    pub smoothed_db: DecayCurve,
    /// Schroeder energy decay curve in dB.
    pub schroeder: DecayCurve,
}

/// Full result of analyzing one signal.
#[derive(Debug, Clone, PartialEq)]
pub struct DecayAnalysis {
    /// EDT, T10, T20, T30.
    pub parameters: AcousticParameters,
    /// C80 and D50, when the signal supports them.
    pub energy: Option<EnergyRatios>,
    /// Curves for inspection.
    pub curves: DecayCurves,
    /// Fitted lines for inspection.
    pub fits: DecayFits,
}

/// Computes [`AcousticParameters`] for one signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcousticParameterEstimator {
    smoother: EnvelopeSmoother,
    selector: DecaySegmentSelector,
    scaler: LogScaler,
}

impl Default for AcousticParameterEstimator {
    fn default() -> Self {
        Self {
            smoother: EnvelopeSmoother::default(),
            selector: DecaySegmentSelector::default(),
            scaler: LogScaler::default().with_floor_db(EstimatorSettings::default().log_floor_db),
        }
    }
}

impl AcousticParameterEstimator {
    /// Build an estimator from settings.
    pub fn new(settings: EstimatorSettings) -> Result<Self> {
        Ok(Self {
            smoother: EnvelopeSmoother::new(settings.smoothing_window)?,
            selector: DecaySegmentSelector::new(settings.threshold_tolerance_db)?,
            scaler: LogScaler::new(settings.log_scale_factor).with_floor_db(settings.log_floor_db),
        })
    }

    /// Smoothing window in samples.
    pub fn smoothing_window(&self) -> usize {
        self.smoother.window()
    }

    /// Decay times only.
    pub fn estimate(&self, signal: &Signal, limit_secs: f64) -> Result<AcousticParameters> {
        self.analyze(signal, limit_secs).map(|a| a.parameters)
    }

    /// Run the full pipeline on `signal`, integrating up to `limit_secs`.
    ///
    /// # Errors
    ///
    /// Any stage failure is returned unchanged; no partial result is built.
    pub fn analyze(&self, signal: &Signal, limit_secs: f64) -> Result<DecayAnalysis> {
        let fs = signal.sample_rate();

        let smoothed = signal.with_samples(self.smoother.smooth(signal)?)?;
        let schroeder = DecayCurve::from_levels(
            SchroederIntegrator::new(limit_secs)?.integrate(signal)?,
            fs,
        )?;

        let signal_db = DecayCurve::from_levels(self.scaler.scale_signal(signal)?, fs)?;
        let smoothed_db = DecayCurve::from_levels(self.scaler.scale_signal(&smoothed)?, fs)?;

        let overall = LinearRegressor::fit(schroeder.time(), schroeder.level_db())?;
        let windows = [
            self.fit_window(&schroeder, DecayWindow::Edt)?,
            self.fit_window(&schroeder, DecayWindow::T10)?,
            self.fit_window(&schroeder, DecayWindow::T20)?,
            self.fit_window(&schroeder, DecayWindow::T30)?,
        ];

        let parameters = AcousticParameters {
            edt: windows[0].decay_time,
            t10: windows[1].decay_time,
            t20: windows[2].decay_time,
            t30: windows[3].decay_time,
        };

        let energy = EnergyRatios::measure(signal);
        if energy.is_none() {
            tracing::debug!(samples = signal.len(), "energy ratios unavailable");
        }

        Ok(DecayAnalysis {
            parameters,
            energy,
            curves: DecayCurves {
                signal_db,
                smoothed_db,
                schroeder,
            },
            fits: DecayFits { overall, windows },
        })
    }

    fn fit_window(&self, schroeder: &DecayCurve, window: DecayWindow) -> Result<WindowFit> {
        let range = self.selector.window(schroeder, window)?;
        let (time, level) = schroeder.segment(range.clone());
        let line = LinearRegressor::fit(time, level)?;
        if line.slope >= 0.0 {
            tracing::warn!(
                window = window.label(),
                slope = line.slope,
                "non-negative decay slope"
            );
        }
        Ok(WindowFit {
            window,
            range,
            decay_time: line.decay_time_60(),
            line,
        })
    }
}
