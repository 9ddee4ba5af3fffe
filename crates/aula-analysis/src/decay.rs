//! Decay curves and evaluation-window selection.
//!
//! ISO 3382 evaluates decay rates over fixed level ranges of the energy
//! decay curve:
//!
//! | Window | From      | To      |
//! |--------|-----------|---------|
//! | EDT    | curve start | -10 dB |
//! | T10    | -5 dB     | -15 dB  |
//! | T20    | -5 dB     | -25 dB  |
//! | T30    | -5 dB     | -35 dB  |
//!
//! Boundaries are located by nearest level (first occurrence on ties). A
//! boundary whose nearest level is further than the selector's tolerance
//! from the target is an [`Error::EmptyResult`]: the curve never reached it.

use aula_core::{Error, Result, linspace};
use std::ops::Range;

/// A decay curve: strictly increasing times with a level in dB per time.
#[derive(Debug, Clone, PartialEq)]
pub struct DecayCurve {
    time: Vec<f64>,
    level_db: Vec<f64>,
}

impl DecayCurve {
    /// Create a curve from explicit times and levels.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] when the curve is empty, lengths differ, or
    /// times are not strictly increasing.
    pub fn new(time: Vec<f64>, level_db: Vec<f64>) -> Result<Self> {
        if time.is_empty() {
            return Err(Error::invalid_input("decay curve has no points"));
        }
        if time.len() != level_db.len() {
            return Err(Error::invalid_input(format!(
                "decay curve has {} times but {} levels",
                time.len(),
                level_db.len()
            )));
        }
        if time.windows(2).any(|w| w[1] <= w[0]) {
            return Err(Error::invalid_input(
                "decay curve times must be strictly increasing",
            ));
        }
        Ok(Self { time, level_db })
    }

    /// Attach a uniform time axis spanning `[0, len / sample_rate]`.
    pub fn from_levels(level_db: Vec<f64>, sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(Error::invalid_input("sample rate must be positive"));
        }
        let duration = level_db.len() as f64 / f64::from(sample_rate);
        let time = linspace(0.0, duration, level_db.len());
        Self::new(time, level_db)
    }

    /// Times in seconds.
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Levels in dB.
    pub fn level_db(&self) -> &[f64] {
        &self.level_db
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Always false; a curve has at least one point.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Times and levels inside `range`.
    pub fn segment(&self, range: Range<usize>) -> (&[f64], &[f64]) {
        (&self.time[range.clone()], &self.level_db[range])
    }
}

/// Level closest to `target` and its index, first occurrence on ties.
///
/// NaN levels are skipped.
///
/// # Errors
///
/// [`Error::EmptyResult`] when there is no comparable level.
pub fn nearest_level(levels: &[f64], target: f64) -> Result<(f64, usize)> {
    let mut best: Option<(f64, usize)> = None;
    let mut best_diff = f64::INFINITY;
    for (i, &level) in levels.iter().enumerate() {
        let diff = (level - target).abs();
        if diff < best_diff {
            best_diff = diff;
            best = Some((level, i));
        }
    }
    best.ok_or_else(|| Error::empty_result(format!("no level comparable to {} dB", target)))
}

/// The four ISO 3382 evaluation windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecayWindow {
    /// Early decay time: curve start to -10 dB.
    Edt,
    /// -5 dB to -15 dB.
    T10,
    /// -5 dB to -25 dB.
    T20,
    /// -5 dB to -35 dB.
    T30,
}

impl DecayWindow {
    /// All windows in reporting order.
    pub const ALL: [DecayWindow; 4] = [
        DecayWindow::Edt,
        DecayWindow::T10,
        DecayWindow::T20,
        DecayWindow::T30,
    ];

    /// Start level (`None` means the first point) and end level in dB.
    pub fn bounds_db(&self) -> (Option<f64>, f64) {
        match self {
            DecayWindow::Edt => (None, -10.0),
            DecayWindow::T10 => (Some(-5.0), -15.0),
            DecayWindow::T20 => (Some(-5.0), -25.0),
            DecayWindow::T30 => (Some(-5.0), -35.0),
        }
    }

    /// Short label used in tables.
    pub fn label(&self) -> &'static str {
        match self {
            DecayWindow::Edt => "EDT",
            DecayWindow::T10 => "T10",
            DecayWindow::T20 => "T20",
            DecayWindow::T30 => "T30",
        }
    }
}

/// Default closeness required between a boundary level and its target.
pub const DEFAULT_TOLERANCE_DB: f64 = 1.0;

/// Locates window boundaries on a decay curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecaySegmentSelector {
    tolerance_db: f64,
}

impl Default for DecaySegmentSelector {
    fn default() -> Self {
        Self {
            tolerance_db: DEFAULT_TOLERANCE_DB,
        }
    }
}

impl DecaySegmentSelector {
    /// Create a selector accepting boundaries within `tolerance_db` of target.
    pub fn new(tolerance_db: f64) -> Result<Self> {
        if !(tolerance_db.is_finite() && tolerance_db > 0.0) {
            return Err(Error::invalid_input(format!(
                "threshold tolerance must be positive, got {} dB",
                tolerance_db
            )));
        }
        Ok(Self { tolerance_db })
    }

    /// Accepted distance from a target level, in dB.
    pub fn tolerance_db(&self) -> f64 {
        self.tolerance_db
    }

    /// Nearest level to `target_db` on `curve` and its index.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyResult`] when the nearest level is further than the
    /// tolerance from the target.
    pub fn locate(&self, curve: &DecayCurve, target_db: f64) -> Result<(f64, usize)> {
        let (level, index) = nearest_level(curve.level_db(), target_db)?;
        if (level - target_db).abs() > self.tolerance_db {
            return Err(Error::empty_result(format!(
                "decay curve does not reach {} dB (closest level {:.2} dB)",
                target_db, level
            )));
        }
        Ok((level, index))
    }

    /// Index range of `window` on `curve`, end exclusive.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyResult`] when a boundary cannot be located or the
    /// window holds fewer than two points.
    pub fn window(&self, curve: &DecayCurve, window: DecayWindow) -> Result<Range<usize>> {
        let (start_db, end_db) = window.bounds_db();
        let start = match start_db {
            Some(db) => self.locate(curve, db)?.1,
            None => 0,
        };
        let end = self.locate(curve, end_db)?.1;

        if end < start + 2 {
            return Err(Error::empty_result(format!(
                "{} window spans fewer than two points ({}..{})",
                window.label(),
                start,
                end
            )));
        }
        Ok(start..end)
    }
}
