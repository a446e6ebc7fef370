//! Accumulated work time.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{load_document, save_document};
use crate::error::Result;

pub const USAGE_FILE: &str = "usage.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStats {
    #[serde(default)]
    pub total_hours: f64,
    #[serde(default)]
    pub total_pomodoros: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl UsageStats {
    pub fn accumulate(&mut self, work: Duration, completed: u64) {
        self.total_hours += work.as_secs_f64() / 3600.0;
        self.total_pomodoros += completed;
    }

    /// Whole hours and the remaining whole minutes of `total_hours`.
    pub fn hours_and_minutes(&self) -> (u64, u64) {
        let total = self.total_hours.max(0.0);
        let hours = total.trunc();
        let minutes = ((total - hours) * 60.0).trunc();
        (hours as u64, minutes as u64)
    }
}

/// `usage.json` on disk.
#[derive(Debug, Clone)]
pub struct UsageTracker {
    path: Option<PathBuf>,
}

impl UsageTracker {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// A tracker with no backing file. Loads are zero and saves are dropped.
    pub fn detached() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Missing or corrupt files load as zeroed stats.
    pub fn load(&self) -> UsageStats {
        load_document(self.path())
    }

    /// Persist `stats`, stamping `last_updated` with the current time.
    pub fn save(&self, stats: &UsageStats) -> Result<()> {
        let stamped = UsageStats {
            last_updated: Some(Utc::now()),
            ..stats.clone()
        };
        save_document(self.path(), &stamped)
    }

    /// Add `work` to the total hours and `completed` to the pomodoro count.
    pub fn add_session(&self, work: Duration, completed: u64) -> Result<UsageStats> {
        let mut stats = self.load();
        stats.accumulate(work, completed);
        self.save(&stats)?;
        Ok(stats)
    }

    pub fn total_hours(&self) -> f64 {
        self.load().total_hours
    }

    pub fn total_pomodoros(&self) -> u64 {
        self.load().total_pomodoros
    }
}
