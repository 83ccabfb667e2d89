//! Configuration loading and precedence tests

use ember_config::{ConfigError, ConfigLoader, DiagnosticFormat};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serial_test::serial;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn create_config_file(dir: &Path, content: &str) -> PathBuf {
    let config_path = dir.join("ember.toml");
    fs::write(&config_path, content).unwrap();
    config_path
}

// ============================================================================
// Config Loading Tests
// ============================================================================

#[test]
fn test_load_project_config_basic() {
    let temp_dir = TempDir::new().unwrap();
    create_config_file(
        temp_dir.path(),
        r#"
[package]
name = "demo"
version = "1.0.0"
"#,
    );

    let config = ConfigLoader::without_env()
        .load_from_directory(temp_dir.path())
        .unwrap();

    assert_eq!(config.package_name(), Some("demo"));
    assert!(config.is_project());
}

#[test]
fn test_load_when_no_config_exists() {
    let temp_dir = TempDir::new().unwrap();

    let config = ConfigLoader::without_env()
        .load_from_directory(temp_dir.path())
        .unwrap();

    assert!(!config.is_project());
    assert_eq!(config.package_name(), None);
    assert_eq!(config.diagnostic_format(), DiagnosticFormat::Human);
}

#[test]
fn test_load_from_subdirectory_finds_parent() {
    let temp_dir = TempDir::new().unwrap();
    create_config_file(
        temp_dir.path(),
        r#"
[run]
entry = "scripts/main.em"
"#,
    );

    let nested = temp_dir.path().join("scripts").join("lib");
    fs::create_dir_all(&nested).unwrap();

    let config = ConfigLoader::without_env()
        .load_from_directory(&nested)
        .unwrap();

    assert_eq!(config.project_root(), Some(temp_dir.path()));
    assert_eq!(
        config.entry_path(),
        Some(temp_dir.path().join("scripts/main.em"))
    );
}

#[test]
fn test_load_with_empty_config() {
    let temp_dir = TempDir::new().unwrap();
    create_config_file(temp_dir.path(), "");

    let config = ConfigLoader::without_env()
        .load_from_directory(temp_dir.path())
        .unwrap();

    assert!(config.is_project());
    assert!(!config.dump_symbols());
}

#[test]
fn test_load_from_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = ConfigLoader::without_env()
        .load_from_file(&temp_dir.path().join("ember.toml"))
        .unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(_)));
}

#[rstest]
#[case::bad_toml("[run\nentry = 1", "Invalid TOML")]
#[case::unknown_section("[compiler]\noptimize = true", "Invalid TOML")]
#[case::bad_precision("[run]\ntrig_precision = 99", "run.trig_precision")]
#[case::empty_name("[package]\nname = \"\"\nversion = \"1.0\"", "package.name")]
#[case::bad_version("[package]\nname = \"x\"\nversion = \"one\"", "Invalid version")]
fn test_invalid_configs(#[case] content: &str, #[case] needle: &str) {
    let temp_dir = TempDir::new().unwrap();
    create_config_file(temp_dir.path(), content);

    let err = ConfigLoader::without_env()
        .load_from_directory(temp_dir.path())
        .unwrap_err();
    let message = err.to_string();
    assert!(
        message.contains(needle),
        "expected '{}' in '{}'",
        needle,
        message
    );
}

// ============================================================================
// Environment Override Tests
// ============================================================================

#[test]
#[serial]
fn test_env_overrides_dump_symbols() {
    let temp_dir = TempDir::new().unwrap();
    create_config_file(temp_dir.path(), "[run]\ndump_symbols = false\n");

    env::set_var("EMBER_DUMP_SYMBOLS", "yes");
    let config = ConfigLoader::new().load_from_directory(temp_dir.path());
    env::remove_var("EMBER_DUMP_SYMBOLS");

    assert!(config.unwrap().dump_symbols());
}

#[test]
#[serial]
fn test_env_overrides_trig_precision() {
    let temp_dir = TempDir::new().unwrap();

    env::set_var("EMBER_TRIG_PRECISION", "4");
    let config = ConfigLoader::new().load_from_directory(temp_dir.path());
    env::remove_var("EMBER_TRIG_PRECISION");

    assert_eq!(config.unwrap().trig_precision(), 4);
}

#[test]
#[serial]
fn test_env_override_rejects_garbage() {
    let temp_dir = TempDir::new().unwrap();

    env::set_var("EMBER_TRIG_PRECISION", "lots");
    let config = ConfigLoader::new().load_from_directory(temp_dir.path());
    env::remove_var("EMBER_TRIG_PRECISION");

    assert!(matches!(config, Err(ConfigError::InvalidValue { .. })));
}

#[test]
#[serial]
fn test_without_env_ignores_overrides() {
    let temp_dir = TempDir::new().unwrap();

    env::set_var("EMBER_DUMP_SYMBOLS", "1");
    let config = ConfigLoader::without_env().load_from_directory(temp_dir.path());
    env::remove_var("EMBER_DUMP_SYMBOLS");

    assert!(!config.unwrap().dump_symbols());
}
