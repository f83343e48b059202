//! Integration tests for configuration management

use nu_roadmap::config::{Config, ConfigOverrides};
use nu_roadmap::core::SchedulerConfig;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(
        !config.logging.level.is_empty(),
        "Default log level should not be empty"
    );
    assert!(
        !config.paths.out_dir.is_empty(),
        "Default out_dir should not be empty"
    );
    assert_eq!(config.scheduler.max_credits, 24);
    assert_eq!(config.scheduler.semesters, 8);
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[paths]
out_dir = "./plans"

[scheduler]
max_credits = 18
semesters = 10
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.out_dir, "./plans");
    assert_eq!(SchedulerConfig::from(&config), SchedulerConfig::new(18, 10));
}

#[test]
fn test_config_from_toml_partial() {
    let toml_str = r#"
[logging]
level = "error"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "");
    assert!(!config.logging.verbose);
    assert_eq!(config.paths.out_dir, "");
    assert_eq!(config.scheduler.max_credits, 0);
    // Unset scheduler values fall back to the built-in cap and horizon
    assert_eq!(SchedulerConfig::from(&config), SchedulerConfig::default());
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$NU_ROADMAP/test.log"

[paths]
out_dir = "$NU_ROADMAP/plans"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    assert!(config.logging.file.contains("nuroadmap"));
    assert!(!config.logging.file.contains("$NU_ROADMAP"));
    assert!(config.paths.out_dir.contains("nuroadmap"));
    assert!(!config.paths.out_dir.contains("$NU_ROADMAP"));
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    assert!(config.get("level").is_some());

    config.set("level", "debug").expect("Failed to set level");
    assert_eq!(config.get("level").unwrap(), "debug");

    config.set("verbose", "true").expect("Failed to set verbose");
    assert!(config.logging.verbose);

    config.set("max-credits", "18").expect("Failed to set max_credits");
    assert_eq!(config.get("max_credits").unwrap(), "18");

    config.set("semesters", "12").expect("Failed to set semesters");
    assert_eq!(config.scheduler.semesters, 12);

    assert!(config.get("unknown_key").is_none());
    assert!(config.set("unknown_key", "value").is_err());
}

#[test]
fn test_config_set_rejects_bad_values() {
    let mut config = Config::from_defaults();

    assert!(config.set("verbose", "maybe").is_err());
    assert!(config.set("max_credits", "0").is_err());
    assert!(config.set("max_credits", "lots").is_err());
    assert!(config.set("semesters", "300").is_err());
    assert_eq!(config.scheduler.max_credits, 24);
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("level", "error").expect("Failed to set level");
    config.set("semesters", "6").expect("Failed to set semesters");

    config.unset("level", &defaults).expect("Failed to unset level");
    config
        .unset("semesters", &defaults)
        .expect("Failed to unset semesters");
    assert_eq!(config.logging.level, defaults.logging.level);
    assert_eq!(config.scheduler.semesters, defaults.scheduler.semesters);

    assert!(config.unset("nope", &defaults).is_err());
}

#[test]
fn test_config_serialized_round_trip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("config.toml");

    let mut config = Config::from_defaults();
    config.set("level", "info").expect("Failed to set level");
    config.set("max_credits", "20").expect("Failed to set max_credits");

    let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");
    fs::write(&config_file, toml_str).expect("Failed to write config");

    let content = fs::read_to_string(&config_file).expect("Failed to read config");
    let loaded = Config::from_toml(&content).expect("Failed to parse loaded config");

    assert_eq!(loaded.logging.level, "info");
    assert_eq!(loaded.scheduler.max_credits, 20);
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        out_dir: Some("./custom_plans".to_string()),
        max_credits: Some(16),
        semesters: Some(4),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.out_dir, "./custom_plans");
    assert_eq!(SchedulerConfig::from(&config), SchedulerConfig::new(16, 4));
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let before = config.paths.out_dir.clone();

    config.apply_overrides(&ConfigOverrides {
        level: Some("debug".to_string()),
        ..Default::default()
    });

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.paths.out_dir, before);
    assert_eq!(config.scheduler.max_credits, 24);
}

#[test]
fn test_config_display_format() {
    let display_str = format!("{}", Config::from_defaults());

    assert!(display_str.contains("[logging]"));
    assert!(display_str.contains("[paths]"));
    assert!(display_str.contains("[scheduler]"));
    assert!(display_str.contains("max_credits = 24"));
    assert!(display_str.contains("semesters = 8"));
}

#[test]
fn test_merge_defaults_adds_missing_fields() {
    let toml_str = r#"
[logging]
level = "error"
file = ""
verbose = false

[paths]
out_dir = ""
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse minimal config");
    let defaults = Config::from_defaults();

    assert!(config.merge_defaults(&defaults));
    assert_eq!(config.paths.out_dir, defaults.paths.out_dir);
    assert_eq!(config.scheduler.max_credits, 24);
    assert_eq!(config.scheduler.semesters, 8);
}

#[test]
fn test_merge_defaults_preserves_existing() {
    let toml_str = r#"
[logging]
level = "error"
file = "/my/custom/path.log"

[paths]
out_dir = "/my/plans"

[scheduler]
max_credits = 18
semesters = 12
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    let defaults = Config::from_defaults();

    config.merge_defaults(&defaults);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/my/custom/path.log");
    assert_eq!(config.paths.out_dir, "/my/plans");
    assert_eq!(config.scheduler.max_credits, 18);
    assert_eq!(config.scheduler.semesters, 12);
}

#[test]
fn test_get_nuroadmap_dir() {
    let dir = Config::get_nuroadmap_dir();

    assert!(dir.to_string_lossy().contains("nuroadmap"));
    assert_ne!(dir, PathBuf::from("."));
}

#[test]
fn test_get_config_file_path() {
    let path = Config::get_config_file_path();

    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}
