//! Per-band parameter tables.
//!
//! [`BandParameterAggregator`] runs the estimator once per band and keeps
//! every outcome, tagged by band, in a [`ParameterTable`]. A failing band
//! never hides the others: its entry carries the error instead of numbers.
//!
//! With the `parallel` feature, bands are estimated on the rayon pool.
//! Table order is always broadband first (when present) followed by the
//! nominal centers ascending.

use crate::decay::DecayWindow;
use crate::energy::EnergyRatios;
use crate::estimator::{AcousticParameterEstimator, AcousticParameters, DecayAnalysis};
use crate::octave::{OctaveBand, OctaveBandFilter};
use aula_core::{Error, RegressionLine, Result, Signal};
use std::fmt;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Identifies a table column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BandId {
    /// The unfiltered input.
    Broadband,
    /// An octave band by nominal center in Hz.
    Octave(f64),
}

impl BandId {
    /// Nominal center, `None` for broadband.
    pub fn center_hz(&self) -> Option<f64> {
        match self {
            BandId::Broadband => None,
            BandId::Octave(center) => Some(*center),
        }
    }
}

impl fmt::Display for BandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BandId::Broadband => write!(f, "broadband"),
            BandId::Octave(center) => write!(f, "{} Hz", center),
        }
    }
}

/// Table rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    /// Early decay time in seconds.
    Edt,
    /// T10 in seconds.
    T10,
    /// T20 in seconds.
    T20,
    /// T30 in seconds.
    T30,
    /// Clarity in dB.
    C80,
    /// Definition as a fraction.
    D50,
}

impl Parameter {
    /// All rows in reporting order.
    pub const ALL: [Parameter; 6] = [
        Parameter::Edt,
        Parameter::T10,
        Parameter::T20,
        Parameter::T30,
        Parameter::C80,
        Parameter::D50,
    ];

    /// Row label.
    pub fn label(&self) -> &'static str {
        match self {
            Parameter::Edt => "EDT",
            Parameter::T10 => "T10",
            Parameter::T20 => "T20",
            Parameter::T30 => "T30",
            Parameter::C80 => "C80",
            Parameter::D50 => "D50",
        }
    }

    /// Unit of the row's values.
    pub fn unit(&self) -> &'static str {
        match self {
            Parameter::Edt | Parameter::T10 | Parameter::T20 | Parameter::T30 => "s",
            Parameter::C80 => "dB",
            Parameter::D50 => "",
        }
    }
}

impl From<DecayWindow> for Parameter {
    fn from(window: DecayWindow) -> Self {
        match window {
            DecayWindow::Edt => Parameter::Edt,
            DecayWindow::T10 => Parameter::T10,
            DecayWindow::T20 => Parameter::T20,
            DecayWindow::T30 => Parameter::T30,
        }
    }
}

/// Numbers kept for a successful band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandSummary {
    /// Decay times.
    pub parameters: AcousticParameters,
    /// C80/D50 when measurable.
    pub energy: Option<EnergyRatios>,
    /// Line fitted over the whole Schroeder curve.
    pub overall: RegressionLine,
}

impl BandSummary {
    /// Value of one table row, `None` for an unavailable energy ratio.
    pub fn value(&self, parameter: Parameter) -> Option<f64> {
        match parameter {
            Parameter::Edt => Some(self.parameters.edt),
            Parameter::T10 => Some(self.parameters.t10),
            Parameter::T20 => Some(self.parameters.t20),
            Parameter::T30 => Some(self.parameters.t30),
            Parameter::C80 => self.energy.map(|e| e.c80_db),
            Parameter::D50 => self.energy.map(|e| e.d50),
        }
    }
}

impl From<&DecayAnalysis> for BandSummary {
    fn from(analysis: &DecayAnalysis) -> Self {
        Self {
            parameters: analysis.parameters,
            energy: analysis.energy,
            overall: analysis.fits.overall,
        }
    }
}

/// One column of the table.
#[derive(Debug, Clone, PartialEq)]
pub struct BandEntry {
    /// Which band.
    pub band: BandId,
    /// Numbers, or why the band failed.
    pub outcome: std::result::Result<BandSummary, Error>,
}

/// Parameters per band, in fixed band order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterTable {
    entries: Vec<BandEntry>,
}

impl ParameterTable {
    /// Every column in order.
    pub fn entries(&self) -> &[BandEntry] {
        &self.entries
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no columns.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Band identifiers in order.
    pub fn bands(&self) -> impl Iterator<Item = BandId> + '_ {
        self.entries.iter().map(|e| e.band)
    }

    /// Entry for `band`.
    pub fn get(&self, band: BandId) -> Option<&BandEntry> {
        self.entries.iter().find(|e| e.band == band)
    }

    /// Successful bands.
    pub fn successes(&self) -> impl Iterator<Item = (BandId, &BandSummary)> + '_ {
        self.entries
            .iter()
            .filter_map(|e| e.outcome.as_ref().ok().map(|s| (e.band, s)))
    }

    /// Failed bands with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (BandId, &Error)> + '_ {
        self.entries
            .iter()
            .filter_map(|e| e.outcome.as_ref().err().map(|err| (e.band, err)))
    }

    /// One row: a cell per band, `None` where the band failed or the
    /// value is unavailable.
    pub fn row(&self, parameter: Parameter) -> Vec<Option<f64>> {
        self.entries
            .iter()
            .map(|e| e.outcome.as_ref().ok().and_then(|s| s.value(parameter)))
            .collect()
    }
}

impl FromIterator<BandEntry> for ParameterTable {
    fn from_iter<I: IntoIterator<Item = BandEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Runs the estimator over each band independently.
#[derive(Debug, Clone, Copy, Default)]
pub struct BandParameterAggregator {
    estimator: AcousticParameterEstimator,
}

impl BandParameterAggregator {
    /// Aggregate with `estimator`.
    pub fn new(estimator: AcousticParameterEstimator) -> Self {
        Self { estimator }
    }

    /// Table for already-split bands, in the given order.
    pub fn aggregate(&self, bands: &[OctaveBand], limit_secs: f64) -> ParameterTable {
        let jobs: Vec<(BandId, Result<&Signal>)> = bands
            .iter()
            .map(|b| (BandId::Octave(b.center_hz()), Ok(&b.signal)))
            .collect();
        self.run(jobs, limit_secs)
    }

    /// Single-column table for the unfiltered signal.
    pub fn aggregate_broadband(&self, signal: &Signal, limit_secs: f64) -> ParameterTable {
        self.run(vec![(BandId::Broadband, Ok(signal))], limit_secs)
    }

    /// Split `signal` into the nominal octave bands and estimate each,
    /// optionally preceded by the broadband column.
    ///
    /// Bands that cannot be designed at the signal's sample rate appear as
    /// failed entries.
    pub fn analyze_signal(
        &self,
        signal: &Signal,
        limit_secs: f64,
        include_broadband: bool,
    ) -> Result<ParameterTable> {
        let filter = OctaveBandFilter::new(signal.sample_rate())?;
        let split = filter.split_each(signal);

        let mut jobs: Vec<(BandId, Result<&Signal>)> = Vec::with_capacity(split.len() + 1);
        if include_broadband {
            jobs.push((BandId::Broadband, Ok(signal)));
        }
        jobs.extend(split.iter().map(|(center, band)| {
            (
                BandId::Octave(*center),
                band.as_ref().map(|b| &b.signal).map_err(Clone::clone),
            )
        }));

        Ok(self.run(jobs, limit_secs))
    }

    fn run(&self, jobs: Vec<(BandId, Result<&Signal>)>, limit_secs: f64) -> ParameterTable {
        #[cfg(feature = "parallel")]
        let entries: Vec<BandEntry> = jobs
            .into_par_iter()
            .map(|(band, signal)| self.estimate_band(band, signal, limit_secs))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let entries: Vec<BandEntry> = jobs
            .into_iter()
            .map(|(band, signal)| self.estimate_band(band, signal, limit_secs))
            .collect();

        ParameterTable { entries }
    }

    fn estimate_band(&self, band: BandId, signal: Result<&Signal>, limit_secs: f64) -> BandEntry {
        let outcome = signal
            .and_then(|s| self.estimator.analyze(s, limit_secs))
            .map(|analysis| BandSummary::from(&analysis));

        match &outcome {
            Ok(summary) => tracing::debug!(
                band = %band,
                edt = summary.parameters.edt,
                t20 = summary.parameters.t20,
                t30 = summary.parameters.t30,
                "band estimated"
            ),
            Err(err) => tracing::warn!(band = %band, error = %err, "band failed"),
        }

        BandEntry { band, outcome }
    }
}
