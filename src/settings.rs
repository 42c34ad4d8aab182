//! Persistent scorer settings.
//!
//! The engine never reads these; the scoring shell layers them on top.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Default settings file name, relative to the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "strictly_cricket.toml";

/// Operator-configured scorer settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Settings {
    /// Innings length in overs; `None` means unlimited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    overs_per_innings: Option<u32>,
}

impl Settings {
    /// Creates settings with no innings limit.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads settings from a TOML file, falling back to defaults if it does not exist.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("Settings file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::new(format!("Failed to read settings file: {}", e)))?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| SettingsError::new(format!("Failed to parse settings: {}", e)))?;

        settings.validate()?;
        info!(overs_per_innings = ?settings.overs_per_innings, "Settings loaded");
        Ok(settings)
    }

    /// Writes settings to a TOML file.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SettingsError::new(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(path.as_ref(), content)
            .map_err(|e| SettingsError::new(format!("Failed to write settings file: {}", e)))?;

        info!("Settings saved");
        Ok(())
    }

    /// Sets the innings length. Must be at least one over.
    #[instrument(skip(self))]
    pub fn set_overs_per_innings(&mut self, overs: u32) -> Result<(), SettingsError> {
        if overs == 0 {
            return Err(SettingsError::new("Overs per innings must be greater than zero"));
        }
        self.overs_per_innings = Some(overs);
        Ok(())
    }

    /// Removes the innings length limit.
    #[instrument(skip(self))]
    pub fn clear_overs_per_innings(&mut self) {
        self.overs_per_innings = None;
    }

    fn validate(&self) -> Result<(), SettingsError> {
        match self.overs_per_innings {
            Some(0) => Err(SettingsError::new("Overs per innings must be greater than zero")),
            _ => Ok(()),
        }
    }
}

/// Settings error.
#[derive(Debug, Clone, Display, Error)]
#[display("Settings error: {} at {}:{}", message, file, line)]
pub struct SettingsError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SettingsError {
    /// Creates a new settings error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
