//! Platform-specific configuration paths.
//!
//! - Linux: `~/.config/aula/analysis.toml`
//! - macOS: `~/Library/Application Support/aula/analysis.toml`
//! - Windows: `%APPDATA%\aula\analysis.toml`

use std::path::PathBuf;

/// Application name used for directory paths.
const APP_NAME: &str = "aula";

/// File name of the analysis configuration.
const CONFIG_FILE: &str = "analysis.toml";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the path of the user's analysis configuration file.
pub fn default_config_path() -> PathBuf {
    user_config_dir().join(CONFIG_FILE)
}
