//! Configuration Loader
//!
//! Finds the project configuration and applies environment overrides.

use crate::project::{ProjectConfig, RunConfig};
use crate::{ConfigError, ConfigResult, DiagnosticFormat, CONFIG_FILE_NAME};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader
///
/// Precedence, lowest first:
/// 1. Defaults
/// 2. Project config (ember.toml) - found by walking up from the start directory
/// 3. Environment variables (EMBER_*)
/// 4. CLI flags - handled by caller
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Skip environment overrides (used when the caller wants file contents only)
    ignore_env: bool,
}

/// Resolved configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Project configuration
    pub project: ProjectConfig,

    /// Project root directory (where ember.toml was found)
    pub project_root: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self { ignore_env: false }
    }

    /// Create a loader that ignores EMBER_* variables
    pub fn without_env() -> Self {
        Self { ignore_env: true }
    }

    /// Load configuration starting from the given directory
    ///
    /// Walks up the directory tree to find ember.toml. A missing file is not an
    /// error: defaults are used and `project_root` stays `None`.
    pub fn load_from_directory(&self, start_dir: &Path) -> ConfigResult<Config> {
        let (project_root, project_config) = self.find_project_config(start_dir)?;
        let project = self.apply_env_overrides(project_config)?;

        Ok(Config {
            project,
            project_root,
        })
    }

    /// Load configuration from a specific ember.toml
    pub fn load_from_file(&self, config_path: &Path) -> ConfigResult<Config> {
        let project_config = ProjectConfig::load_from_file(config_path)?;
        let project = self.apply_env_overrides(project_config)?;

        Ok(Config {
            project,
            project_root: config_path.parent().map(|p| p.to_path_buf()),
        })
    }

    fn find_project_config(
        &self,
        start_dir: &Path,
    ) -> ConfigResult<(Option<PathBuf>, ProjectConfig)> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);

            if config_path.exists() {
                let project_config = ProjectConfig::load_from_file(&config_path)?;
                return Ok((Some(current), project_config));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Ok((None, ProjectConfig::default())),
            }
        }
    }

    /// Apply environment variable overrides to project config
    ///
    /// Recognized: EMBER_DUMP_SYMBOLS, EMBER_TRIG_PRECISION
    fn apply_env_overrides(&self, mut config: ProjectConfig) -> ConfigResult<ProjectConfig> {
        if self.ignore_env {
            return Ok(config);
        }

        if let Ok(dump) = env::var("EMBER_DUMP_SYMBOLS") {
            let dump_bool = matches!(dump.to_lowercase().as_str(), "true" | "1" | "yes");
            config
                .run
                .get_or_insert_with(RunConfig::default)
                .dump_symbols = Some(dump_bool);
        }

        if let Ok(precision) = env::var("EMBER_TRIG_PRECISION") {
            let parsed = precision
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidValue {
                    field: "EMBER_TRIG_PRECISION".to_string(),
                    reason: format!("'{}' is not a non-negative integer", precision),
                })?;
            config
                .run
                .get_or_insert_with(RunConfig::default)
                .trig_precision = Some(parsed);
        }

        config.validate()?;
        Ok(config)
    }
}

impl Config {
    /// Get the project root directory
    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    /// Check whether an ember.toml was found
    pub fn is_project(&self) -> bool {
        self.project_root.is_some()
    }

    /// Get the package name
    pub fn package_name(&self) -> Option<&str> {
        self.project.package_name()
    }

    /// Entry script resolved against the project root
    pub fn entry_path(&self) -> Option<PathBuf> {
        let entry = self.project.entry()?;
        Some(match &self.project_root {
            Some(root) => root.join(entry),
            None => entry.to_path_buf(),
        })
    }

    /// Whether symbol tables should be printed after a run
    pub fn dump_symbols(&self) -> bool {
        self.project.dump_symbols()
    }

    /// Trigonometric rounding precision
    pub fn trig_precision(&self) -> u32 {
        self.project.trig_precision()
    }

    /// Diagnostic output format
    pub fn diagnostic_format(&self) -> DiagnosticFormat {
        self.project.diagnostic_format()
    }
}
