//! TOML-based application configuration.
//!
//! Stores user settings that are not presets:
//! - Default work/break/long-break durations
//! - Whether desktop notifications are shown
//! - How many artwork lines each completed pomodoro unlocks
//!
//! Configuration is stored at `~/.pomodoro/config.toml`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::DataDir;
use crate::error::{Result, ValidationError};
use crate::session::SessionPlan;

pub const CONFIG_FILE: &str = "config.toml";

/// Durations, in minutes, used by the "default values" menu entry and as
/// the suggested answers of the custom timer prompts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_focus_duration")]
    pub focus_duration: u32,
    #[serde(default = "default_short_break")]
    pub short_break: u32,
    #[serde(default = "default_long_break")]
    pub long_break: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardsConfig {
    #[serde(default = "default_lines_per_pomodoro")]
    pub lines_per_pomodoro: u32,
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub rewards: RewardsConfig,
}

fn default_focus_duration() -> u32 {
    25
}
fn default_short_break() -> u32 {
    5
}
fn default_long_break() -> u32 {
    20
}
fn default_true() -> bool {
    true
}
fn default_lines_per_pomodoro() -> u32 {
    1
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            focus_duration: default_focus_duration(),
            short_break: default_short_break(),
            long_break: default_long_break(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            lines_per_pomodoro: default_lines_per_pomodoro(),
        }
    }
}

impl Config {
    /// Load from `path`. A missing file yields (and writes) the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed or holds
    /// zero durations, or if the defaults cannot be written.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Persist to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load `config.toml` from the data directory, returning defaults on error.
    pub fn load_or_default(data_dir: &DataDir) -> Self {
        Self::load_from(&data_dir.file(CONFIG_FILE)).unwrap_or_else(|e| {
            debug!(error = %e, "using default configuration");
            Self::default()
        })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let durations = [
            ("schedule.focus_duration", self.schedule.focus_duration),
            ("schedule.short_break", self.schedule.short_break),
            ("schedule.long_break", self.schedule.long_break),
        ];
        for (field, minutes) in durations {
            if minutes == 0 {
                return Err(ValidationError::InvalidValue {
                    field: field.into(),
                    message: "duration must be at least one minute".into(),
                });
            }
        }
        if self.rewards.lines_per_pomodoro == 0 {
            return Err(ValidationError::InvalidValue {
                field: "rewards.lines_per_pomodoro".into(),
                message: "must unlock at least one line".into(),
            });
        }
        Ok(())
    }

    /// The plan started by the "default values" menu entry.
    pub fn default_plan(&self) -> SessionPlan {
        SessionPlan::from_minutes(
            self.schedule.focus_duration,
            self.schedule.short_break,
            self.schedule.long_break,
        )
    }
}
