//! CLI configuration via environment variables
//!
//! Project settings come from ember.toml; these only shape how the CLI
//! talks to the terminal.

use std::env;
use std::path::PathBuf;

/// CLI configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Default to JSON diagnostic output (EMBER_DIAGNOSTICS=json)
    pub default_json: bool,
    /// Disable colored output (EMBER_NO_COLOR=1 or NO_COLOR=1)
    pub no_color: bool,
    /// Custom history file path (EMBER_HISTORY_FILE=/path/to/file)
    pub history_file: Option<PathBuf>,
    /// Disable history by default (EMBER_NO_HISTORY=1)
    pub no_history: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            default_json: env::var("EMBER_DIAGNOSTICS")
                .map(|v| v.to_lowercase() == "json")
                .unwrap_or(false),
            no_color: env::var("EMBER_NO_COLOR").is_ok() || env::var("NO_COLOR").is_ok(),
            history_file: env::var("EMBER_HISTORY_FILE").ok().map(PathBuf::from),
            no_history: env::var("EMBER_NO_HISTORY").is_ok(),
        }
    }

    /// Get the history file path
    ///
    /// Returns:
    /// 1. EMBER_HISTORY_FILE if set
    /// 2. ~/.ember/history if home directory exists
    /// 3. None otherwise
    pub fn get_history_path(&self) -> Option<PathBuf> {
        if let Some(ref path) = self.history_file {
            return Some(path.clone());
        }
        dirs::home_dir().map(|home| home.join(".ember").join("history"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
