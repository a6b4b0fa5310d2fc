use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::retention::{clamp_retention_days, RetentionConfig, DEFAULT_RETENTION_DAYS};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Settings IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),
}

/// Panel color theme. Presentation interprets it; the core only
/// round-trips the value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Red,
    #[default]
    Blue,
    White,
    Black,
    Rainbow,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Red => "red",
            Theme::Blue => "blue",
            Theme::White => "white",
            Theme::Black => "black",
            Theme::Rainbow => "rainbow",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = SettingsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "red" => Ok(Theme::Red),
            "blue" => Ok(Theme::Blue),
            "white" => Ok(Theme::White),
            "black" => Ok(Theme::Black),
            "rainbow" => Ok(Theme::Rainbow),
            other => Err(SettingsError::UnknownTheme(other.to_string())),
        }
    }
}

/// User-facing feature flags and preferences, persisted as TOML next to
/// the task store. The core reads them per operation; writes go back
/// through [`save_settings`] verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub enable_checklist: bool,
    pub auto_delete_completed: bool,
    pub retention_days: u32,
    pub language: String,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enable_checklist: true,
            auto_delete_completed: true,
            retention_days: DEFAULT_RETENTION_DAYS,
            language: "en".to_string(),
            theme: Theme::default(),
        }
    }
}

impl Settings {
    pub fn retention(&self) -> RetentionConfig {
        RetentionConfig {
            auto_delete_enabled: self.auto_delete_completed,
            retention_days: clamp_retention_days(self.retention_days),
        }
    }

    /// Out-of-range values are clamped into [1, 365] rather than
    /// rejected.
    pub fn set_retention_days(&mut self, days: u32) {
        self.retention_days = clamp_retention_days(days);
    }
}

/// Missing or unparseable settings fall back to defaults; retention
/// days are clamped on the way in.
pub fn load_settings(path: &Path) -> Settings {
    let Ok(text) = fs::read_to_string(path) else {
        return Settings::default();
    };
    let mut settings: Settings = toml::from_str(&text).unwrap_or_default();
    settings.retention_days = clamp_retention_days(settings.retention_days);
    settings
}

pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), SettingsError> {
    let body = toml::to_string_pretty(settings)?;
    fs::write(path, body)?;
    Ok(())
}
