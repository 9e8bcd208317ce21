//! Integration tests for configuration management

use libretto::config::{Config, ConfigOverrides};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a temporary config directory
fn setup_temp_config() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("config.toml");
    (temp_dir, config_file)
}

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(
        !config.logging.level.is_empty(),
        "Default log level should not be empty"
    );
    assert!(
        !config.storage.records_file.is_empty(),
        "Default records_file should not be empty"
    );
    assert!(config.grading.target_scale > 0.0);
    assert!(config.grading.source_scale > 0.0);
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[storage]
records_file = "/tmp/exams.json"

[grading]
target_scale = 100.0
source_scale = 30.0
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(config.storage.records_file, "/tmp/exams.json");
    assert!((config.grading.target_scale - 100.0).abs() < f64::EPSILON);
}

#[test]
fn test_config_from_toml_partial() {
    // Missing fields and sections use serde defaults
    let toml_str = r#"
[logging]
level = "error"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "");
    assert!(!config.logging.verbose);
    assert_eq!(config.storage.records_file, "");
    assert!(config.grading.target_scale.abs() < f64::EPSILON);
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$LIBRETTO/test.log"

[storage]
records_file = "$LIBRETTO/exams.json"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    assert!(config.logging.file.contains("libretto"));
    assert!(!config.logging.file.contains("$LIBRETTO"));
    assert!(config.storage.records_file.ends_with("exams.json"));
    assert!(!config.storage.records_file.contains("$LIBRETTO"));
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    assert!(config.get("level").is_some());

    config.set("level", "debug").expect("Failed to set level");
    assert_eq!(config.get("level").unwrap(), "debug");

    config
        .set("verbose", "true")
        .expect("Failed to set verbose");
    assert!(config.logging.verbose);
    assert!(config.set("verbose", "maybe").is_err());

    config
        .set("records-file", "/data/exams.json")
        .expect("Failed to set records file");
    assert_eq!(config.get("records_file").unwrap(), "/data/exams.json");

    assert!(config.get("unknown_key").is_none());
    assert!(config.set("unknown_key", "value").is_err());
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("level", "debug").expect("Failed to set level");
    config.set("target_scale", "100").expect("Failed to set scale");

    config
        .unset("level", &defaults)
        .expect("Failed to unset level");
    config
        .unset("target-scale", &defaults)
        .expect("Failed to unset scale");
    assert_eq!(config.logging.level, defaults.logging.level);
    assert!((config.grading.target_scale - defaults.grading.target_scale).abs() < f64::EPSILON);
    assert!(config.unset("nope", &defaults).is_err());
}

#[test]
fn test_config_save_and_load() {
    let (_temp_dir, config_file) = setup_temp_config();

    let mut config = Config::from_defaults();
    config.set("level", "info").expect("Failed to set level");
    config
        .set("records_file", "/data/exams.json")
        .expect("Failed to set records file");
    config.save_to(&config_file).expect("Failed to save config");

    let loaded = Config::load_from(&config_file);
    assert_eq!(loaded.logging.level, "info");
    assert_eq!(loaded.storage.records_file, "/data/exams.json");
}

#[test]
fn test_load_creates_file_on_first_run() {
    let (temp_dir, _) = setup_temp_config();
    let config_file = temp_dir.path().join("nested").join("config.toml");

    let config = Config::load_from(&config_file);

    assert!(config_file.exists());
    assert_eq!(config.logging.level, Config::from_defaults().logging.level);
}

#[test]
fn test_load_merges_missing_fields_into_file() {
    let (_temp_dir, config_file) = setup_temp_config();
    fs::write(&config_file, "[logging]\nlevel = \"error\"\n").expect("Failed to write config");

    let config = Config::load_from(&config_file);
    assert_eq!(config.logging.level, "error");
    assert!(!config.storage.records_file.is_empty());

    let content = fs::read_to_string(&config_file).expect("Failed to read config");
    assert!(content.contains("records_file"));
    assert!(content.contains("target_scale"));
}

#[test]
fn test_invalid_file_falls_back_to_defaults() {
    let (_temp_dir, config_file) = setup_temp_config();
    fs::write(&config_file, "this is = = not toml").expect("Failed to write config");

    let config = Config::load_from(&config_file);
    assert_eq!(config.logging.level, Config::from_defaults().logging.level);
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        records_file: Some("$LIBRETTO/other.json".to_string()),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert!(config.storage.records_file.ends_with("other.json"));
    assert!(!config.storage.records_file.contains("$LIBRETTO"));
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let records_before = config.storage.records_file.clone();

    let overrides = ConfigOverrides {
        level: Some("debug".to_string()),
        ..Default::default()
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.storage.records_file, records_before);
}

#[test]
fn test_config_display_format() {
    let config = Config::from_defaults();
    let display_str = format!("{config}");

    assert!(display_str.contains("[logging]"));
    assert!(display_str.contains("[storage]"));
    assert!(display_str.contains("[grading]"));
    assert!(display_str.contains("records_file"));
    assert!(display_str.contains("target_scale"));
}

#[test]
fn test_merge_defaults_adds_missing_fields() {
    let toml_str = r#"
[logging]
level = "error"
file = ""
verbose = false

[storage]
records_file = ""
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse minimal config");
    let defaults = Config::from_defaults();

    let changed = config.merge_defaults(&defaults);

    assert!(
        changed,
        "merge_defaults should return true when fields are added"
    );
    assert_eq!(config.storage.records_file, defaults.storage.records_file);
    assert!((config.grading.source_scale - 30.0).abs() < f64::EPSILON);
}

#[test]
fn test_merge_defaults_preserves_existing() {
    let toml_str = r#"
[logging]
level = "error"
file = "/my/custom/path.log"

[storage]
records_file = "/my/exams.json"

[grading]
target_scale = 100.0
source_scale = 30.0
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    let defaults = Config::from_defaults();

    config.merge_defaults(&defaults);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/my/custom/path.log");
    assert_eq!(config.storage.records_file, "/my/exams.json");
    assert!((config.grading.target_scale - 100.0).abs() < f64::EPSILON);
}

#[test]
fn test_get_libretto_dir() {
    let dir = Config::get_libretto_dir();

    assert!(dir.to_string_lossy().contains("libretto"));
    assert_ne!(dir, PathBuf::from("."));
}

#[test]
fn test_get_config_file_path() {
    let path = Config::get_config_file_path();

    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}
