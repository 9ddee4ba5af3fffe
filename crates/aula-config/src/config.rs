//! Analysis configuration file.

use crate::ConfigError;
use crate::paths::default_config_path;
use aula_analysis::EstimatorSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for one analysis run.
///
/// Every field is optional in TOML; missing fields take their defaults.
///
/// ```toml
/// integration_limit_secs = 3.0
/// smoothing_window = 1000
/// log_scale_factor = 20.0
/// log_floor_db = -120.0
/// threshold_tolerance_db = 1.0
/// include_broadband = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Schroeder integration limit in seconds.
    pub integration_limit_secs: f64,
    /// Envelope moving-average window in samples.
    pub smoothing_window: usize,
    /// Multiplier for display log scaling (20 = amplitude dB).
    pub log_scale_factor: f64,
    /// Floor of the display curves in dB.
    pub log_floor_db: f64,
    /// Accepted distance between a decay window boundary and its target.
    pub threshold_tolerance_db: f64,
    /// Add a broadband column ahead of the octave bands.
    pub include_broadband: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        let settings = EstimatorSettings::default();
        Self {
            integration_limit_secs: 3.0,
            smoothing_window: settings.smoothing_window,
            log_scale_factor: settings.log_scale_factor,
            log_floor_db: settings.log_floor_db,
            threshold_tolerance_db: settings.threshold_tolerance_db,
            include_broadband: true,
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid_value(
            field,
            format!("must be a positive number, got {}", value),
        ))
    }
}

impl AnalysisConfig {
    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load the user's configuration file, or defaults when there is none.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = default_config_path();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        std::fs::write(path, self.to_toml()?).map_err(|e| ConfigError::write_file(path, e))
    }

    /// Save as the user's configuration file, which later runs pick up
    /// through [`load_default`](Self::load_default). Returns the path written.
    pub fn save_default(&self) -> Result<PathBuf, ConfigError> {
        self.validate()?;
        let path = default_config_path();
        self.save(&path)?;
        Ok(path)
    }

    /// Convert the configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every field is usable by the estimator.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("integration_limit_secs", self.integration_limit_secs)?;
        positive("log_scale_factor", self.log_scale_factor)?;
        positive("threshold_tolerance_db", self.threshold_tolerance_db)?;
        if self.smoothing_window == 0 {
            return Err(ConfigError::invalid_value(
                "smoothing_window",
                "must be at least 1",
            ));
        }
        if !(self.log_floor_db.is_finite() && self.log_floor_db < 0.0) {
            return Err(ConfigError::invalid_value(
                "log_floor_db",
                format!("must be a negative number, got {}", self.log_floor_db),
            ));
        }
        Ok(())
    }

    /// Estimator settings carried by this configuration.
    pub fn to_settings(&self) -> EstimatorSettings {
        EstimatorSettings {
            smoothing_window: self.smoothing_window,
            log_scale_factor: self.log_scale_factor,
            log_floor_db: self.log_floor_db,
            threshold_tolerance_db: self.threshold_tolerance_db,
        }
    }
}
