//! User profile and application configuration.
//!
//! T010: Implement Config loading from TOML
//! T016: Define UserProfile with body weight

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::metrics::summary::{FrequencyWindow, FREQUENCY_WINDOW_DAYS};
use crate::workouts::types::ValidationError;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "GYMLOG_DATA_DIR";

/// Per-user (or per-device) profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Body weight in kilograms, needed for calorie estimates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            weight_kg: None,
            updated_at: Utc::now(),
        }
    }
}

impl UserProfile {
    /// Update body weight. Only finite positive values are accepted.
    pub fn set_weight(&mut self, weight_kg: f64) -> Result<(), ValidationError> {
        if !Self::validate_weight(weight_kg) {
            return Err(ValidationError::InvalidWeight(weight_kg));
        }

        self.weight_kg = Some(weight_kg);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Validate a weight value.
    pub fn validate_weight(weight_kg: f64) -> bool {
        weight_kg.is_finite() && weight_kg > 0.0
    }
}

/// Which record store backs the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// SQLite database file
    #[default]
    Sqlite,
    /// One JSON document per collection
    Json,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Sqlite => write!(f, "sqlite"),
            StorageBackend::Json => write!(f, "json"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Data directory path
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Storage settings
    #[serde(default)]
    pub storage: StorageSettings,
    /// Statistics settings
    #[serde(default)]
    pub stats: StatsSettings,
}

impl AppConfig {
    /// Path of the SQLite database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.storage.database_file)
    }
}

/// Storage-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Backend to use
    pub backend: StorageBackend,
    /// Database file name inside the data directory
    pub database_file: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Sqlite,
            database_file: "gymlog.db".to_string(),
        }
    }
}

/// Statistics-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsSettings {
    /// Days counted back for weekly frequency
    pub frequency_window_days: i64,
    /// Weeks the windowed count is divided by
    pub frequency_weeks: f64,
}

impl Default for StatsSettings {
    fn default() -> Self {
        Self {
            frequency_window_days: FREQUENCY_WINDOW_DAYS,
            frequency_weeks: 4.0,
        }
    }
}

impl StatsSettings {
    /// Frequency window for the metrics engine.
    pub fn frequency_window(&self) -> FrequencyWindow {
        FrequencyWindow {
            days: self.frequency_window_days,
            weeks: self.frequency_weeks,
        }
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    directories::ProjectDirs::from("com", "gymlog", "GymLog")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// The configuration file inside a data directory.
pub fn get_config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}

/// Load application configuration from the default location.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&get_data_dir())
}

/// Load configuration from `data_dir/config.toml`, falling back to defaults.
pub fn load_config_from(data_dir: &Path) -> Result<AppConfig, ConfigError> {
    let path = get_config_path(data_dir);

    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(AppConfig {
            data_dir: data_dir.to_path_buf(),
            ..Default::default()
        });
    }

    let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let mut config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    config.data_dir = data_dir.to_path_buf();

    Ok(config)
}

/// Save application configuration into its data directory.
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    std::fs::create_dir_all(&config.data_dir).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let content = toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(get_config_path(&config.data_dir), content)
        .map_err(|e| ConfigError::IoError(e.to_string()))?;

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
}
