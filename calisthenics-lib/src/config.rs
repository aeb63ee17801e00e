//src/config.rs
use crate::form::{DraftDefaults, NumericField};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use thiserror::Error;
use tracing::{info, warn};

const CONFIG_FILE_NAME: &str = "config.toml";
const APP_CONFIG_DIR: &str = "calisthenics-calendar";
const CONFIG_ENV_VAR: &str = "CALISTHENICS_CONFIG_DIR"; // Environment variable name

#[derive(Error, Debug)]
pub enum Error {
    #[error("Could not determine configuration directory.")]
    CannotDetermineConfigDir,
    #[error("I/O error accessing config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file (TOML): {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Failed to serialize config data (TOML): {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("Invalid color name: {0}")]
    InvalidColor(String),
    #[error("Invalid value for '{key}': {value}. It must be between 1 and {max}.")]
    InvalidValue {
        key: &'static str,
        value: u32,
        max: u32,
    },
}

/// First column of the month grid.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    #[must_use]
    pub const fn weekday(self) -> Weekday {
        match self {
            Self::Monday => Weekday::Mon,
            Self::Sunday => Weekday::Sun,
        }
    }
}

// Define standard colors using strum for easy iteration/parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum StandardColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    DarkGrey,
    DarkRed,
    DarkGreen,
    DarkYellow,
    DarkBlue,
    DarkMagenta,
    DarkCyan,
    Grey,
}

// Helper to parse a string into our StandardColor enum
pub fn parse_color(color_str: &str) -> Result<StandardColor, Error> {
    StandardColor::iter()
        .find(|color| format!("{color:?}").eq_ignore_ascii_case(color_str.trim()))
        .ok_or_else(|| Error::InvalidColor(color_str.to_string()))
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)] // Ensure defaults are used if fields are missing
pub struct Theme {
    pub header_color: String,
    pub event_color: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header_color: "Green".to_string(),
            event_color: "Blue".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)] // Ensure defaults are used if fields are missing
pub struct Config {
    pub default_sets: u32,
    pub default_reps: u32,
    pub default_recurring_weeks: u32,
    pub week_start: WeekStart,

    // Theming
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        let defaults = DraftDefaults::default();
        Self {
            default_sets: defaults.sets,
            default_reps: defaults.reps,
            default_recurring_weeks: defaults.recurring_weeks,
            week_start: WeekStart::default(),
            theme: Theme::default(),
        }
    }
}

impl Config {
    /// What a fresh workout form starts with.
    #[must_use]
    pub const fn draft_defaults(&self) -> DraftDefaults {
        DraftDefaults {
            sets: self.default_sets,
            reps: self.default_reps,
            recurring_weeks: self.default_recurring_weeks,
        }
    }

    /// Checks values serde cannot: counts must be in range and colors known.
    pub fn validate(&self) -> Result<(), Error> {
        for (key, value, field) in [
            ("default_sets", self.default_sets, NumericField::Sets),
            ("default_reps", self.default_reps, NumericField::Reps),
            (
                "default_recurring_weeks",
                self.default_recurring_weeks,
                NumericField::RecurringWeeks,
            ),
        ] {
            let max = field.max();
            if !(1..=max).contains(&value) {
                return Err(Error::InvalidValue { key, value, max });
            }
        }
        parse_color(&self.theme.header_color)?;
        parse_color(&self.theme.event_color)?;
        Ok(())
    }
}

/// Path of the config file inside an explicit directory.
#[must_use]
pub fn config_path_in(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE_NAME)
}

/// Determines the path to the configuration file.
/// The `CALISTHENICS_CONFIG_DIR` environment variable takes precedence over
/// the platform config directory.
pub fn get_config_path() -> Result<PathBuf, Error> {
    let config_dir_override = std::env::var(CONFIG_ENV_VAR).ok();

    let config_dir_path = if let Some(path_str) = config_dir_override {
        let path = PathBuf::from(path_str);
        if !path.is_dir() {
            warn!(
                "Environment variable {} points to '{}', which is not a directory. Trying to create it.",
                CONFIG_ENV_VAR,
                path.display()
            );
            fs::create_dir_all(&path)?;
        }
        path
    } else {
        let base_config_dir = dirs::config_dir().ok_or(Error::CannotDetermineConfigDir)?;
        base_config_dir.join(APP_CONFIG_DIR)
    };

    if !config_dir_path.exists() {
        fs::create_dir_all(&config_dir_path)?;
    }

    Ok(config_path_in(&config_dir_path))
}

/// Loads the configuration from the TOML file at the given path.
/// A missing file is created with the defaults.
pub fn load(config_path: &Path) -> Result<Config, Error> {
    if config_path.exists() {
        let config_content = fs::read_to_string(config_path)?;
        let config: Config = toml::from_str(&config_content)?;
        config.validate()?;
        Ok(config)
    } else {
        info!(path = %config_path.display(), "writing default configuration");
        let default_config = Config::default();
        save(config_path, &default_config)?;
        Ok(default_config)
    }
}

/// Saves the configuration to the TOML file.
pub fn save(config_path: &Path, config: &Config) -> Result<(), Error> {
    if let Some(parent_dir) = config_path.parent() {
        if !parent_dir.exists() {
            fs::create_dir_all(parent_dir)?;
        }
    }
    let config_content = toml::to_string_pretty(config)?;
    fs::write(config_path, config_content)?;
    Ok(())
}
