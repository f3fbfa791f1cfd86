//! Integration tests for configuration management

use academic_navigator::config::{Config, ConfigOverrides};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(!config.logging.level.is_empty(), "Default log level should not be empty");
    assert!(!config.paths.data_file.is_empty(), "Default data_file should not be empty");
    assert!(!config.paths.reports_dir.is_empty(), "Default reports_dir should not be empty");
    assert!(!config.share.base_url.is_empty(), "Default base_url should not be empty");

    // Every $NAVIGATOR_HOME reference is expanded
    assert!(!config.paths.data_file.contains("$NAVIGATOR_HOME"));
    assert!(config.paths.data_file.ends_with("academicNavigatorData.json"));
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[paths]
data_file = "./data.json"
reports_dir = "./reports"

[share]
base_url = "https://example.org/nav/"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.data_file, "./data.json");
    assert_eq!(config.paths.reports_dir, "./reports");
    assert_eq!(config.share.base_url, "https://example.org/nav/");
}

#[test]
fn test_config_from_toml_partial() {
    let toml_str = r#"
[logging]
level = "warn"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "warn");
    assert!(config.logging.file.is_empty());
    assert!(!config.logging.verbose);
    assert!(config.paths.data_file.is_empty());
    assert!(config.share.base_url.is_empty());
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
level = "info"
file = "$NAVIGATOR_HOME/logs/nav.log"

[paths]
data_file = "$NAVIGATOR_HOME/data.json"
reports_dir = "$NAVIGATOR_HOME/reports"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");
    let home = Config::get_navigator_dir();

    assert_eq!(config.logging.file, home.join("logs/nav.log").to_string_lossy());
    assert_eq!(config.paths.data_file, home.join("data.json").to_string_lossy());
    assert!(!config.paths.reports_dir.contains('$'));
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    config.set("level", "INFO").expect("Failed to set level");
    assert_eq!(config.get("level"), Some("info".to_string()));

    config.set("verbose", "true").expect("Failed to set verbose");
    assert_eq!(config.get("verbose"), Some("true".to_string()));

    config.set("data-file", "/tmp/d.json").expect("Failed to set data file");
    assert_eq!(config.get("data_file"), Some("/tmp/d.json".to_string()));

    config.set("base_url", "https://x.org/").expect("Failed to set base url");
    assert_eq!(config.get("base-url"), Some("https://x.org/".to_string()));

    assert!(config.set("level", "loud").is_err());
    assert!(config.set("verbose", "maybe").is_err());
    assert!(config.set("unknown", "x").is_err());
    assert_eq!(config.get("unknown"), None);
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("reports_dir", "/elsewhere").unwrap();
    config.set("verbose", "true").unwrap();
    config.unset("reports_dir", &defaults).expect("Failed to unset");
    config.unset("verbose", &defaults).expect("Failed to unset");

    assert_eq!(config.paths.reports_dir, defaults.paths.reports_dir);
    assert_eq!(config.logging.verbose, defaults.logging.verbose);
    assert!(config.unset("nope", &defaults).is_err());
}

#[test]
fn test_config_toml_round_trip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("config.toml");

    let mut config = Config::from_defaults();
    config.set("level", "error").unwrap();
    config.set("base_url", "https://example.org/rt/").unwrap();
    fs::write(&config_file, config.to_toml().expect("Failed to serialize")).unwrap();

    let content = fs::read_to_string(&config_file).unwrap();
    let loaded = Config::from_toml(&content).expect("Failed to parse saved config");

    assert_eq!(loaded.logging.level, "error");
    assert_eq!(loaded.share.base_url, "https://example.org/rt/");
    assert_eq!(loaded.paths.data_file, config.paths.data_file);
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        data_file: Some("/custom/data.json".to_string()),
        reports_dir: Some("./custom_reports".to_string()),
        base_url: Some("https://override.org/".to_string()),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.data_file, "/custom/data.json");
    assert_eq!(config.paths.reports_dir, "./custom_reports");
    assert_eq!(config.share.base_url, "https://override.org/");
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let before = config.clone();

    config.apply_overrides(&ConfigOverrides {
        level: Some("debug".to_string()),
        ..ConfigOverrides::default()
    });

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.paths.data_file, before.paths.data_file);
    assert_eq!(config.share.base_url, before.share.base_url);
}

#[test]
fn test_config_display_format() {
    let display_str = Config::from_defaults().to_string();

    assert!(display_str.contains("[logging]"));
    assert!(display_str.contains("[paths]"));
    assert!(display_str.contains("[share]"));
    assert!(display_str.contains("data_file"));
    assert!(display_str.contains("base_url"));
}

#[test]
fn test_merge_defaults_adds_missing_fields() {
    let toml_str = r#"
[logging]
level = "error"
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse minimal config");
    let defaults = Config::from_defaults();

    assert!(config.merge_defaults(&defaults), "merge_defaults should report added fields");
    assert_eq!(config.logging.level, "error");
    assert_eq!(config.paths.data_file, defaults.paths.data_file);
    assert_eq!(config.share.base_url, defaults.share.base_url);

    // A second merge has nothing left to add
    assert!(!config.merge_defaults(&defaults));
}

#[test]
fn test_merge_defaults_preserves_existing() {
    let toml_str = r#"
[logging]
level = "error"
file = "/my/custom/path.log"

[paths]
data_file = "/my/data.json"
reports_dir = "/my/reports"

[share]
base_url = "https://mine.example.org/"
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    config.merge_defaults(&Config::from_defaults());

    assert_eq!(config.logging.file, "/my/custom/path.log");
    assert_eq!(config.paths.data_file, "/my/data.json");
    assert_eq!(config.share.base_url, "https://mine.example.org/");
}

#[test]
fn test_get_navigator_dir() {
    let dir = Config::get_navigator_dir();
    assert!(dir.ends_with("academic-navigator"));
}

#[test]
fn test_get_config_file_path() {
    let path = Config::get_config_file_path();
    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
    assert!(path.starts_with(Config::get_navigator_dir()));
}
