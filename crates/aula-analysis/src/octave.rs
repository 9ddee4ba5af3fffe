//! Octave-band splitting (IEC 61260 nominal centers).
//!
//! Each nominal center gets a 4th-order Butterworth band-pass spanning
//! `center / sqrt(2)` to `center * sqrt(2)`. An upper cutoff that would reach
//! Nyquist is pulled down to `Nyquist - 1 Hz`; a band whose cutoffs collapse
//! after that is rejected as [`Error::InvalidConfiguration`].
//!
//! # Example
//!
//! ```rust
//! use aula_analysis::octave::{OctaveBandFilter, NOMINAL_CENTERS_HZ};
//! use aula_core::Signal;
//!
//! let filter = OctaveBandFilter::new(44100).unwrap();
//! let signal = Signal::new(vec![1.0; 4410], 44100).unwrap();
//! let bands = filter.split(&signal).unwrap();
//! assert_eq!(bands.len(), NOMINAL_CENTERS_HZ.len());
//! assert!(bands.iter().all(|b| b.signal.len() == signal.len()));
//! ```

use aula_core::{BandpassDesign, Error, Result, Signal};
use std::f64::consts::SQRT_2;

/// Nominal octave-band centers in Hz.
pub const NOMINAL_CENTERS_HZ: [f64; 10] = [
    31.5, 63.0, 125.0, 250.0, 500.0, 1000.0, 2000.0, 4000.0, 8000.0, 16000.0,
];

/// Prototype order of each band filter.
pub const FILTER_ORDER: usize = 4;

/// Nominal stopband attenuation target in dB. A Butterworth response has no
/// stopband ripple parameter; the value documents the design target only.
pub const STOPBAND_ATTENUATION_DB: f64 = 60.0;

/// Ratio between the center and each cutoff.
pub const BAND_RATIO: f64 = SQRT_2;

/// Cutoff frequencies of one octave band at a given sample rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandEdges {
    /// Nominal center frequency in Hz.
    pub center_hz: f64,
    /// Lower -3 dB cutoff in Hz.
    pub lower_hz: f64,
    /// Upper -3 dB cutoff in Hz (clamped below Nyquist).
    pub upper_hz: f64,
}

impl BandEdges {
    /// Compute the cutoffs for `center_hz`, clamping the upper edge.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfiguration`] when the lower cutoff is not positive
    /// or the band collapses (`lower >= upper`) after clamping.
    pub fn for_center(center_hz: f64, sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(Error::invalid_configuration("sample rate must be positive"));
        }
        let nyquist = f64::from(sample_rate) / 2.0;
        let lower_hz = center_hz / BAND_RATIO;
        let mut upper_hz = center_hz * BAND_RATIO;
        if upper_hz >= nyquist {
            tracing::debug!(
                center_hz,
                upper_hz,
                clamped_hz = nyquist - 1.0,
                "upper cutoff clamped below Nyquist"
            );
            upper_hz = nyquist - 1.0;
        }

        if lower_hz <= 0.0 {
            return Err(Error::invalid_configuration(format!(
                "{} Hz band has a non-positive lower cutoff",
                center_hz
            )));
        }
        if lower_hz >= upper_hz {
            return Err(Error::invalid_configuration(format!(
                "{} Hz band collapses at {} Hz sample rate ({:.1} >= {:.1} Hz)",
                center_hz, sample_rate, lower_hz, upper_hz
            )));
        }

        Ok(Self {
            center_hz,
            lower_hz,
            upper_hz,
        })
    }
}

/// One band-limited copy of the input.
#[derive(Debug, Clone, PartialEq)]
pub struct OctaveBand {
    /// Cutoffs used for this band.
    pub edges: BandEdges,
    /// The band-filtered signal, same length and rate as the input.
    pub signal: Signal,
    /// The filter that produced `signal`.
    pub design: BandpassDesign,
}

impl OctaveBand {
    /// Nominal center frequency in Hz.
    pub fn center_hz(&self) -> f64 {
        self.edges.center_hz
    }

    /// Magnitude response (linear) of this band's filter at `freq_hz`.
    pub fn magnitude_at(&self, freq_hz: f64) -> f64 {
        self.design.magnitude_at(freq_hz)
    }
}

/// Outcome of designing one band: the center plus its filter, or why the
/// band cannot exist at this sample rate.
type BandSlot = (f64, Result<(BandEdges, BandpassDesign)>);

/// Splits a broadband signal into the nominal octave bands.
#[derive(Debug, Clone)]
pub struct OctaveBandFilter {
    sample_rate: u32,
    slots: Vec<BandSlot>,
}

impl OctaveBandFilter {
    /// Design all nominal bands for `sample_rate`.
    ///
    /// Bands that cannot exist at this rate are kept as failures so
    /// [`split_each`](Self::split_each) can report them per band; the
    /// constructor only fails for a zero sample rate.
    pub fn new(sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(Error::invalid_configuration("sample rate must be positive"));
        }

        let slots = NOMINAL_CENTERS_HZ
            .iter()
            .map(|&center| {
                let design = BandEdges::for_center(center, sample_rate).and_then(|edges| {
                    BandpassDesign::butterworth(
                        FILTER_ORDER,
                        edges.lower_hz,
                        edges.upper_hz,
                        f64::from(sample_rate),
                    )
                    .map(|design| (edges, design))
                });
                (center, design)
            })
            .collect();

        Ok(Self { sample_rate, slots })
    }

    /// Sample rate the bands were designed for.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Cutoffs (or design failure) for every nominal center, in order.
    pub fn edges(&self) -> Vec<(f64, Result<BandEdges>)> {
        self.slots
            .iter()
            .map(|(center, slot)| (*center, slot.as_ref().map(|(e, _)| *e).map_err(Clone::clone)))
            .collect()
    }

    /// Filter design for the nominal center `center_hz`.
    pub fn design(&self, center_hz: f64) -> Result<&BandpassDesign> {
        match self.slots.iter().find(|(c, _)| *c == center_hz) {
            Some((_, Ok((_, design)))) => Ok(design),
            Some((_, Err(err))) => Err(err.clone()),
            None => Err(Error::invalid_configuration(format!(
                "{} Hz is not a nominal octave-band center",
                center_hz
            ))),
        }
    }

    /// Filter `signal` into every band, failing if any band is invalid.
    pub fn split(&self, signal: &Signal) -> Result<Vec<OctaveBand>> {
        self.split_each(signal)
            .into_iter()
            .map(|(_, band)| band)
            .collect()
    }

    /// Filter `signal` into the single band centered at `center_hz`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfiguration`] when `center_hz` is not a nominal
    /// center or its band cannot be designed at this sample rate.
    pub fn band(&self, signal: &Signal, center_hz: f64) -> Result<OctaveBand> {
        let Some((_, slot)) = self.slots.iter().find(|(c, _)| *c == center_hz) else {
            return Err(Error::invalid_configuration(format!(
                "{} Hz is not a nominal octave-band center",
                center_hz
            )));
        };
        self.filter_slot(slot, signal)
    }

    fn filter_slot(
        &self,
        slot: &Result<(BandEdges, BandpassDesign)>,
        signal: &Signal,
    ) -> Result<OctaveBand> {
        let (edges, design) = slot.as_ref().map_err(Clone::clone)?;
        if signal.sample_rate() != self.sample_rate {
            return Err(Error::invalid_configuration(format!(
                "filter designed for {} Hz, signal is {} Hz",
                self.sample_rate,
                signal.sample_rate()
            )));
        }
        signal
            .with_samples(design.filter(signal.samples()))
            .map(|filtered| OctaveBand {
                edges: *edges,
                signal: filtered,
                design: design.clone(),
            })
    }

    /// Filter `signal` into every band, reporting failures per band.
    ///
    /// # Errors
    ///
    /// A band fails with [`Error::InvalidConfiguration`] if it cannot be
    /// designed at this sample rate, or if `signal` was recorded at a
    /// different rate than the filter was designed for.
    pub fn split_each(&self, signal: &Signal) -> Vec<(f64, Result<OctaveBand>)> {
        self.slots
            .iter()
            .map(|(center, slot)| (*center, self.filter_slot(slot, signal)))
            .collect()
    }
}
