//! Configuration for Aula room-acoustic analysis.
//!
//! An [`AnalysisConfig`] holds the numeric knobs of a run (integration
//! limit, envelope smoothing, log scaling, threshold tolerance, broadband
//! column) and is stored as TOML in the user's configuration directory.
//!
//! # Example
//!
//! ```rust,no_run
//! use aula_config::AnalysisConfig;
//!
//! let mut config = AnalysisConfig::load_default().unwrap();
//! config.integration_limit_secs = 2.0;
//! let path = config.save_default().unwrap();
//! assert_eq!(AnalysisConfig::load(path).unwrap(), config);
//! ```

mod config;
mod error;

/// Platform-specific configuration paths.
pub mod paths;

pub use config::AnalysisConfig;
pub use error::ConfigError;
pub use paths::{default_config_path, user_config_dir};
