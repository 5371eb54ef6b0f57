//! Configuration tests

use super::*;
use std::path::PathBuf;
use tempfile::NamedTempFile;

#[test]
fn test_config_serialization() {
    let config = AppConfig::default();
    let yaml = serde_yaml::to_string(&config).unwrap();
    let parsed: AppConfig = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(config.version, parsed.version);
    assert_eq!(parsed.theme.stylesheet, "blueberry.css");
}

#[test]
fn test_config_from_file() {
    let mut config = AppConfig::default();
    config.data.data_dir = PathBuf::from("./var/cafeteria");

    let temp_file = NamedTempFile::new().unwrap();
    config.save_to_file(temp_file.path()).unwrap();

    let loaded = AppConfig::from_file(temp_file.path()).unwrap();
    assert_eq!(loaded.data.data_dir, PathBuf::from("./var/cafeteria"));
}

#[test]
fn test_missing_sections_use_defaults() {
    let config: AppConfig = serde_yaml::from_str("version: \"1.0\"\n").unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.export.export_dir, PathBuf::from("exports"));
    assert_eq!(config.theme.output_path, PathBuf::from("dist/theme.css"));
}

#[test]
fn test_config_validation() {
    let mut config = AppConfig::default();
    assert!(config.validate().is_ok());

    config.version = "2.0".to_string();
    assert!(config.validate().is_err());

    let mut config = AppConfig::default();
    config.theme.stylesheet = "dark".to_string();
    assert!(config.validate().is_err());

    let mut config = AppConfig::default();
    config.data.data_dir = PathBuf::new();
    assert!(config.validate().is_err());
}

#[test]
fn test_tilde_expansion() {
    let mut config = AppConfig::default();
    config.data.data_dir = PathBuf::from("~/cafeteria-data");

    let expanded = config.data_dir();
    if let Some(home) = dirs::home_dir() {
        assert_eq!(expanded, home.join("cafeteria-data"));
    }
    assert_eq!(
        expand_path(&PathBuf::from("relative/dir")),
        PathBuf::from("relative/dir")
    );
}
