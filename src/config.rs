//! Configuration loading for the planning crate.
//!
//! Settings are read from a TOML file. Every field has a default, so an
//! empty file is valid:
//!
//! ```toml
//! [editor]
//! default_duration_on_change = 1
//! max_recurrent_events = 200
//! start_of_week = 0
//! default_timezone = "UTC"
//!
//! [repository]
//! type = "local"
//! ```

use std::path::Path;

use chrono_tz::Tz;
use serde::Deserialize;

use crate::db::factory::RepositoryType;
use crate::db::repository::RepositoryError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanningConfig {
    #[serde(default)]
    pub editor: EditorProfile,
    #[serde(default)]
    pub repository: RepositorySettings,
}

/// Tunables for the schedule editor and recurrence expansion.
#[derive(Debug, Clone, Deserialize)]
pub struct EditorProfile {
    /// Hours to push the other schedule boundary when the first concrete
    /// time is picked on a single-day all-day event. `0` disables the nudge.
    #[serde(default = "default_duration_on_change")]
    pub default_duration_on_change: i64,
    /// Hard cap on the number of events one recurrence rule may generate.
    #[serde(default = "default_max_recurrent_events")]
    pub max_recurrent_events: usize,
    /// First day of the week, 0 = Sunday through 6 = Saturday.
    #[serde(default = "default_start_of_week")]
    pub start_of_week: u8,
    /// Timezone assumed for events that do not carry one.
    #[serde(default = "default_timezone")]
    pub default_timezone: Tz,
}

fn default_duration_on_change() -> i64 {
    1
}

fn default_max_recurrent_events() -> usize {
    200
}

fn default_start_of_week() -> u8 {
    0
}

fn default_timezone() -> Tz {
    Tz::UTC
}

impl Default for EditorProfile {
    fn default() -> Self {
        Self {
            default_duration_on_change: default_duration_on_change(),
            max_recurrent_events: default_max_recurrent_events(),
            start_of_week: default_start_of_week(),
            default_timezone: default_timezone(),
        }
    }
}

/// Which repository backend to construct.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type", default = "default_repository_type")]
    pub repo_type: String,
}

fn default_repository_type() -> String {
    "local".to_string()
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            repo_type: default_repository_type(),
        }
    }
}

impl PlanningConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::ConfigurationError(format!("Failed to read config file: {}", e))
        })?;

        let config: PlanningConfig = toml::from_str(&content).map_err(|e| {
            RepositoryError::ConfigurationError(format!("Failed to parse config file: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the first of the usual locations that exists.
    pub fn from_default_location() -> Result<Self, RepositoryError> {
        let candidates = ["planning.toml", "config/planning.toml", "../planning.toml"];
        for candidate in candidates {
            if Path::new(candidate).exists() {
                return Self::from_file(candidate);
            }
        }
        Err(RepositoryError::ConfigurationError(
            "No configuration file found (looked for planning.toml)".to_string(),
        ))
    }

    /// Resolve the configured repository backend.
    pub fn repository_type(&self) -> Result<RepositoryType, String> {
        RepositoryType::from_str(&self.repository.repo_type)
    }

    /// Reject values the editor cannot work with.
    pub fn validate(&self) -> Result<(), RepositoryError> {
        if self.editor.start_of_week > 6 {
            return Err(RepositoryError::ConfigurationError(format!(
                "start_of_week must be 0..=6, got {}",
                self.editor.start_of_week
            )));
        }
        if self.editor.default_duration_on_change < 0 {
            return Err(RepositoryError::ConfigurationError(format!(
                "default_duration_on_change must not be negative, got {}",
                self.editor.default_duration_on_change
            )));
        }
        if self.editor.max_recurrent_events == 0 {
            return Err(RepositoryError::ConfigurationError(
                "max_recurrent_events must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
