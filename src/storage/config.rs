//! Engine configuration loaded from TOML.

use std::path::{Path, PathBuf};

use chrono::{Duration, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::gamification::types::ChallengePeriod;

/// Largest accepted UTC offset, in minutes.
pub const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// Largest accepted retention for completed challenges, in days.
pub const MAX_RETENTION_DAYS: u32 = 3650;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Data directory path
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Local offset from UTC used for calendar days, in minutes
    pub utc_offset_minutes: i32,
    /// Challenge settings
    pub challenges: ChallengeSettings,
    /// Achievement journal settings
    pub achievements: AchievementSettings,
    /// Storage settings
    pub storage: StorageSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::new(),
            utc_offset_minutes: 0,
            challenges: ChallengeSettings::default(),
            achievements: AchievementSettings::default(),
            storage: StorageSettings::default(),
        }
    }
}

impl EngineConfig {
    /// The configured offset. Falls back to UTC if out of range.
    pub fn day_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60))
            .unwrap_or_else(|| Utc.fix())
    }

    /// How long completed challenges are kept after they end.
    pub fn completed_retention(&self) -> Duration {
        Duration::days(i64::from(self.challenges.completed_retention_days))
    }

    /// Path of the SQLite database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.storage.database_file)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.utc_offset_minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(ConfigError::ParseError(format!(
                "utc_offset_minutes must be within ±{}, got {}",
                MAX_OFFSET_MINUTES, self.utc_offset_minutes
            )));
        }
        if self.challenges.completed_retention_days > MAX_RETENTION_DAYS {
            return Err(ConfigError::ParseError(format!(
                "challenges.completed_retention_days must be at most {}, got {}",
                MAX_RETENTION_DAYS, self.challenges.completed_retention_days
            )));
        }
        if self.storage.database_file.trim().is_empty() {
            return Err(ConfigError::ParseError(
                "storage.database_file must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Challenge-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChallengeSettings {
    /// Periods whose templates are generated
    pub periods: Vec<ChallengePeriod>,
    /// Days a completed challenge stays visible after its period ends
    pub completed_retention_days: u32,
}

impl Default for ChallengeSettings {
    fn default() -> Self {
        Self {
            periods: ChallengePeriod::all().to_vec(),
            completed_retention_days: 30,
        }
    }
}

/// Achievement journal settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AchievementSettings {
    /// Maximum number of journal entries kept
    pub log_limit: usize,
}

impl Default for AchievementSettings {
    fn default() -> Self {
        Self { log_limit: 50 }
    }
}

/// Storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Database file name, relative to the data directory
    pub database_file: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_file: "progress.db".to_string(),
        }
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("org", "wastetracker", "WasteProgress")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Load configuration from the default location.
pub fn load_config() -> Result<EngineConfig, ConfigError> {
    load_config_from(&get_config_path())
}

/// Load configuration from `path`, using defaults if the file is missing.
///
/// The data directory is the directory containing `path`.
pub fn load_config_from(path: &Path) -> Result<EngineConfig, ConfigError> {
    let data_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    if !path.exists() {
        return Ok(EngineConfig {
            data_dir,
            ..Default::default()
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let mut config: EngineConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    config.validate()?;
    config.data_dir = data_dir;

    Ok(config)
}

/// Save configuration to `path`.
pub fn save_config_to(config: &EngineConfig, path: &Path) -> Result<(), ConfigError> {
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
}
