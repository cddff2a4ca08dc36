//! Unit tests for configuration loading and saving.

use tempfile::TempDir;
use trainload::config::{load_config_from, save_config_to, AppConfig, ConfigError};

#[test]
fn test_missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let config = load_config_from(&dir.path().join("absent.toml")).unwrap();

    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = AppConfig::default();
    config.predictor.n_trees = 12;
    config.predictor.seed = 2025;
    config.report.decimals = 1;

    save_config_to(&path, &config).unwrap();
    let loaded = load_config_from(&path).unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn test_invalid_values_rejected_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[predictor]\nn_trees = 0\n").unwrap();

    let result = load_config_from(&path);
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_malformed_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[predictor\nseed = ").unwrap();

    let result = load_config_from(&path);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}
