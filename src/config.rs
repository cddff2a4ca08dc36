//! Application configuration.
//!
//! Loaded from `config.toml` in the platform data directory; a missing file
//! means defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ml::{ForestConfig, TreeConfig};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Performance predictor settings
    pub predictor: PredictorSettings,
    /// Report output settings
    pub report: ReportSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            predictor: PredictorSettings::default(),
            report: ReportSettings::default(),
        }
    }
}

impl AppConfig {
    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.predictor;
        if p.n_trees == 0 {
            return Err(ConfigError::Invalid("predictor.n_trees must be at least 1".into()));
        }
        if p.max_depth == Some(0) {
            return Err(ConfigError::Invalid("predictor.max_depth must be at least 1".into()));
        }
        if p.min_samples_leaf == 0 {
            return Err(ConfigError::Invalid(
                "predictor.min_samples_leaf must be at least 1".into(),
            ));
        }
        if !p.min_distance_km.is_finite() || p.min_distance_km < 0.0 {
            return Err(ConfigError::Invalid(
                "predictor.min_distance_km must be a non-negative number".into(),
            ));
        }
        if !p.default_distance_km.is_finite() || p.default_distance_km < p.min_distance_km {
            return Err(ConfigError::Invalid(
                "predictor.default_distance_km must not be below min_distance_km".into(),
            ));
        }
        if self.report.decimals > 6 {
            return Err(ConfigError::Invalid("report.decimals must be at most 6".into()));
        }
        Ok(())
    }
}

/// Random forest hyper-parameters and query bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorSettings {
    /// Trees per athlete model
    pub n_trees: usize,
    /// Bootstrap sampling seed
    pub seed: u64,
    /// Maximum depth of each tree; unlimited when absent
    pub max_depth: Option<usize>,
    /// Minimum samples required to split a node
    pub min_samples_split: usize,
    /// Minimum samples in a leaf
    pub min_samples_leaf: usize,
    /// Smallest distance a query may ask for (km)
    pub min_distance_km: f64,
    /// Distance used when the caller does not supply one (km)
    pub default_distance_km: f64,
}

impl Default for PredictorSettings {
    fn default() -> Self {
        Self {
            n_trees: 100,
            seed: 42,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            min_distance_km: 1.0,
            default_distance_km: 10.0,
        }
    }
}

impl PredictorSettings {
    /// Forest configuration derived from these settings.
    pub fn forest_config(&self) -> ForestConfig {
        ForestConfig {
            n_trees: self.n_trees,
            seed: self.seed,
            tree: TreeConfig {
                max_depth: self.max_depth,
                min_samples_split: self.min_samples_split,
                min_samples_leaf: self.min_samples_leaf,
            },
        }
    }
}

/// Report output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Decimal places for predicted durations
    pub decimals: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self { decimals: 2 }
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "trainload", "TrainLoad")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Load configuration from the default location.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&get_config_path())
}

/// Load configuration from a file; a missing file yields defaults.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    config.validate()?;

    Ok(config)
}

/// Save configuration to a file.
pub fn save_config_to(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
