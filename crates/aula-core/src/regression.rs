//! Closed-form least-squares line fitting.

use crate::error::{Error, Result};

/// A fitted line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionLine {
    /// Rate of change of `y` per unit `x` (dB per second on a decay curve).
    pub slope: f64,
    /// Value of the line at `x = 0`.
    pub intercept: f64,
}

impl RegressionLine {
    /// Evaluate the line at `x`.
    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Time needed for the line to fall by 60 dB: `-60 / slope`.
    ///
    /// A non-negative slope yields a negative or infinite value; callers
    /// decide whether that is acceptable.
    pub fn decay_time_60(&self) -> f64 {
        -60.0 / self.slope
    }
}

/// Ordinary least squares via the covariance/variance ratio.
pub struct LinearRegressor;

impl LinearRegressor {
    /// Fit a line through `(x[i], y[i])`.
    ///
    /// Means are removed before accumulating products, which keeps the fit
    /// well-conditioned when `x` is a long time axis.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if either slice is empty, the lengths differ,
    /// `x` has zero variance, or any value is non-finite.
    pub fn fit(x: &[f64], y: &[f64]) -> Result<RegressionLine> {
        if x.is_empty() || y.is_empty() {
            return Err(Error::invalid_input("regression needs at least one point"));
        }
        if x.len() != y.len() {
            return Err(Error::invalid_input(format!(
                "regression inputs differ in length ({} vs {})",
                x.len(),
                y.len()
            )));
        }
        if x.iter().chain(y).any(|v| !v.is_finite()) {
            return Err(Error::invalid_input("regression inputs must be finite"));
        }

        let n = x.len() as f64;
        let x_mean = x.iter().sum::<f64>() / n;
        let y_mean = y.iter().sum::<f64>() / n;

        let mut covariance = 0.0;
        let mut variance = 0.0;
        for (&xi, &yi) in x.iter().zip(y) {
            let dx = xi - x_mean;
            covariance += dx * (yi - y_mean);
            variance += dx * dx;
        }

        if variance == 0.0 {
            return Err(Error::invalid_input(
                "regression x values have zero variance",
            ));
        }

        let slope = covariance / variance;
        Ok(RegressionLine {
            slope,
            intercept: y_mean - slope * x_mean,
        })
    }
}
