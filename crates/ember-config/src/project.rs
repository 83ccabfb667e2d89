//! Project Configuration (ember.toml)
//!
//! Handles project-level configuration stored in `ember.toml` at the project root.

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default number of fractional digits kept by `sin`, `cos` and `tan`
pub const DEFAULT_TRIG_PRECISION: u32 = 10;

/// Largest precision that still fits in an f64 mantissa
pub const MAX_TRIG_PRECISION: u32 = 15;

/// Project configuration from ember.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Package metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<PackageConfig>,

    /// Script execution settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run: Option<RunConfig>,

    /// Diagnostic output settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<DiagnosticsConfig>,
}

/// Package metadata configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PackageConfig {
    /// Package name
    pub name: String,

    /// Package version
    pub version: String,

    /// Package description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Execution configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Script run by `ember run` when no file is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<PathBuf>,

    /// Print declared variables and functions after a run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dump_symbols: Option<bool>,

    /// Fractional digits kept by trigonometric functions (default: 10)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trig_precision: Option<u32>,
}

/// Diagnostics configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct DiagnosticsConfig {
    /// Output format for errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<DiagnosticFormat>,
}

/// How diagnostics are rendered
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticFormat {
    /// Colored, source-annotated text
    #[default]
    Human,
    /// One JSON object per diagnostic
    Json,
}

impl ProjectConfig {
    /// Load project configuration from a file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
            file: path.to_path_buf(),
            error: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the project configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(pkg) = &self.package {
            if pkg.name.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "package.name".to_string(),
                    reason: "name cannot be empty".to_string(),
                });
            }

            if !is_valid_version(&pkg.version) {
                return Err(ConfigError::InvalidVersion(pkg.version.clone()));
            }
        }

        if let Some(precision) = self.run.as_ref().and_then(|r| r.trig_precision) {
            if precision > MAX_TRIG_PRECISION {
                return Err(ConfigError::InvalidValue {
                    field: "run.trig_precision".to_string(),
                    reason: format!(
                        "{} exceeds the maximum of {}",
                        precision, MAX_TRIG_PRECISION
                    ),
                });
            }
        }

        if let Some(entry) = self.run.as_ref().and_then(|r| r.entry.as_ref()) {
            if entry.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "run.entry".to_string(),
                    reason: "entry cannot be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Get the package name, if present
    pub fn package_name(&self) -> Option<&str> {
        self.package.as_ref().map(|p| p.name.as_str())
    }

    /// Get the package version, if present
    pub fn package_version(&self) -> Option<&str> {
        self.package.as_ref().map(|p| p.version.as_str())
    }

    /// Get the configured entry script, if present
    pub fn entry(&self) -> Option<&Path> {
        self.run.as_ref().and_then(|r| r.entry.as_deref())
    }

    /// Whether symbol tables should be printed after a run
    pub fn dump_symbols(&self) -> bool {
        self.run
            .as_ref()
            .and_then(|r| r.dump_symbols)
            .unwrap_or(false)
    }

    /// Trigonometric rounding precision
    pub fn trig_precision(&self) -> u32 {
        self.run
            .as_ref()
            .and_then(|r| r.trig_precision)
            .unwrap_or(DEFAULT_TRIG_PRECISION)
    }

    /// Diagnostic output format
    pub fn diagnostic_format(&self) -> DiagnosticFormat {
        self.diagnostics
            .as_ref()
            .and_then(|d| d.format)
            .unwrap_or_default()
    }
}

/// Version validation: X.Y or X.Y.Z with optional pre-release/build suffix
fn is_valid_version(version: &str) -> bool {
    let main_version = version.split(['-', '+']).next().unwrap_or("");
    if main_version.is_empty() {
        return false;
    }

    let parts: Vec<&str> = main_version.split('.').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return false;
    }

    parts
        .iter()
        .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
}
