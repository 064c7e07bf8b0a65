//! User settings
//!
//! Stored as `settings.json` under the platform config directory:
//! ```text
//! <config_dir>/co2vent/settings.json
//! ```
//! Only the target and the status thresholds live here; readings are never persisted.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::projection::DEFAULT_TARGET_PPM;
use crate::status::StatusThresholds;

/// Settings file name inside the application config directory
pub const SETTINGS_FILE: &str = "settings.json";

/// Errors loading, saving or validating settings
#[derive(Error, Debug)]
pub enum SettingsError {
    /// No platform config directory is available
    #[error("Could not determine the user config directory")]
    NoConfigDir,

    /// Values fail validation
    #[error("Invalid settings: {0}")]
    Invalid(String),

    /// File is not valid settings JSON
    #[error("Malformed settings file: {0}")]
    Parse(#[from] serde_json::Error),

    /// Reading or writing the file failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Persisted user settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Settings version for migrations
    pub version: String,

    /// Concentration the projection aims for
    pub target_ppm: f64,

    /// Status tier bounds
    pub thresholds: StatusThresholds,

    /// When the file was last written
    pub modified: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            target_ppm: DEFAULT_TARGET_PPM,
            thresholds: StatusThresholds::default(),
            modified: Utc::now().to_rfc3339(),
        }
    }
}

impl Settings {
    /// Default settings file location
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        let base = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
        Ok(base.join("co2vent").join(SETTINGS_FILE))
    }

    /// Load settings from `path`, falling back to defaults if the file does not exist
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("No settings at {:?}, using defaults", path);
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let settings: Settings = serde_json::from_str(&content)?;
        settings.validate()?;
        info!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Save settings to `path`, creating parent directories as needed
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SettingsError> {
        self.validate()?;
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        self.modified = Utc::now().to_rfc3339();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Check the target is positive and the thresholds ascend
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.target_ppm.is_finite() || self.target_ppm <= 0.0 {
            return Err(SettingsError::Invalid(format!(
                "target_ppm must be positive, got {}",
                self.target_ppm
            )));
        }
        if !self.thresholds.is_ascending() {
            return Err(SettingsError::Invalid(format!(
                "thresholds must be positive and strictly ascending, got {} / {} / {}",
                self.thresholds.ideal_max, self.thresholds.good_max, self.thresholds.concerning_max
            )));
        }
        Ok(())
    }
}
