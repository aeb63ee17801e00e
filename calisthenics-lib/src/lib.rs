// src/lib.rs
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

// --- Declare modules ---
pub mod catalog;
mod config;
pub mod controller;
pub mod events;
pub mod form;
pub mod grouping;
pub mod store;

// --- Expose public types ---
pub use catalog::{CategoryMap, ExerciseCategory, ExerciseDefinition};
pub use config::{
    config_path_in, get_config_path as get_config_path_util, load as load_config_util,
    parse_color, save as save_config_util, Config, Error as ConfigError, StandardColor, Theme,
    WeekStart,
};
pub use controller::{
    parse_calendar_date, ClickOutcome, InputError, InteractionController, SubmitOutcome, View,
};
pub use events::{project_events, CalendarEvent};
pub use form::{
    DraftDefaults, DraftExercise, FormDraft, FormError, FormState, NumericField, Submission,
    WorkoutForm,
};
pub use grouping::{group_by_category, ExerciseGroup};
pub use store::{
    ExerciseEntry, NewWorkout, StoreChange, SubscriptionId, WorkoutId, WorkoutRecord,
    WorkoutStore,
};

/// Everything a front-end needs, built once at start-up.
///
/// The hosting shell constructs this explicitly; nothing in the library
/// touches global state on its own.
#[derive(Debug)]
pub struct TrackerService {
    pub config: Config,
    pub config_path: PathBuf,
    pub controller: InteractionController,
}

impl TrackerService {
    /// Initializes the service from the default config location.
    /// # Errors
    /// Returns `anyhow::Error` if the config path cannot be determined or the
    /// config file cannot be loaded.
    pub fn initialize() -> Result<Self> {
        let config_path =
            config::get_config_path().context("Failed to determine configuration file path")?;
        Self::from_config_path(config_path)
    }

    /// Initializes the service with the config file inside `config_dir`.
    /// # Errors
    /// Returns `anyhow::Error` if the config file cannot be loaded or created.
    pub fn initialize_in(config_dir: &Path) -> Result<Self> {
        Self::from_config_path(config_path_in(config_dir))
    }

    fn from_config_path(config_path: PathBuf) -> Result<Self> {
        let config = config::load(&config_path)
            .with_context(|| format!("Failed to load config from {config_path:?}"))?;
        Ok(Self::with_config(config, config_path))
    }

    /// Builds the service around an already loaded configuration.
    #[must_use]
    pub fn with_config(config: Config, config_path: PathBuf) -> Self {
        let controller = InteractionController::new(config.draft_defaults());
        Self {
            config,
            config_path,
            controller,
        }
    }

    pub fn get_config_path(&self) -> &Path {
        &self.config_path
    }

    /// Colors for the calendar header and the workout events.
    /// # Errors
    /// Returns `ConfigError::InvalidColor` if a theme color is unknown.
    pub fn theme_colors(&self) -> Result<(StandardColor, StandardColor), ConfigError> {
        Ok((
            parse_color(&self.config.theme.header_color)?,
            parse_color(&self.config.theme.event_color)?,
        ))
    }
}
