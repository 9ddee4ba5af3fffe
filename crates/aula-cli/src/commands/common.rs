//! Shared CLI helpers used across multiple commands.

use aula_analysis::{AcousticParameterEstimator, BandId};
use aula_config::AnalysisConfig;
use clap::Args;
use std::path::PathBuf;

/// Analysis options shared by `analyze` and `curves`.
///
/// Values come from `--config`, else the user's configuration file, else
/// defaults; explicit flags override all of them.
#[derive(Args, Debug, Clone)]
pub struct AnalysisOptions {
    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Schroeder integration limit in seconds
    #[arg(short, long, value_name = "SECS")]
    pub limit: Option<f64>,

    /// Envelope smoothing window in samples
    #[arg(long, value_name = "SAMPLES")]
    pub smoothing: Option<usize>,

    /// Accepted distance between a decay threshold and the curve, in dB
    #[arg(long, value_name = "DB")]
    pub tolerance: Option<f64>,
}

impl AnalysisOptions {
    /// Resolve the effective configuration.
    pub fn resolve(&self) -> anyhow::Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::load(path)?,
            None => AnalysisConfig::load_default()?,
        };

        if let Some(limit) = self.limit {
            config.integration_limit_secs = limit;
        }
        if let Some(window) = self.smoothing {
            config.smoothing_window = window;
        }
        if let Some(tolerance) = self.tolerance {
            config.threshold_tolerance_db = tolerance;
        }

        config.validate()?;
        tracing::debug!(?config, "analysis configuration");
        Ok(config)
    }
}

/// Build the estimator for `config`.
pub fn estimator(config: &AnalysisConfig) -> anyhow::Result<AcousticParameterEstimator> {
    Ok(AcousticParameterEstimator::new(config.to_settings())?)
}

/// Parse `broadband` or a nominal center frequency in Hz.
pub fn parse_band(s: &str) -> Result<BandId, String> {
    if s.eq_ignore_ascii_case("broadband") {
        return Ok(BandId::Broadband);
    }
    let trimmed = s.trim_end_matches("Hz").trim();
    trimmed
        .parse::<f64>()
        .map(BandId::Octave)
        .map_err(|_| format!("Invalid band: '{}' (expected 'broadband' or a frequency)", s))
}

/// Format an optional value for terminal tables.
pub fn format_cell(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.*}", precision, v))
}
