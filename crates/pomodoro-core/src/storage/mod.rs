//! File storage under the per-user data directory.
//!
//! Everything lives in `~/.pomodoro/` unless `POMODORO_HOME` points elsewhere:
//! - `presets.json`: saved presets and the last used preset
//! - `usage.json`: accumulated work time and completed pomodoros
//! - `artwork.json`: artwork reveal progress
//! - `config.toml`: application settings
//!
//! Every JSON document is read-modify-written as a whole. There is no locking,
//! so two processes writing the same file will clobber each other.

mod config;
pub mod presets;
pub mod usage;

pub use config::{Config, NotificationsConfig, RewardsConfig, ScheduleConfig, CONFIG_FILE};
pub use presets::{Preset, PresetFile, PresetStore, LAST_USED_NAME, PRESETS_FILE};
pub use usage::{UsageStats, UsageTracker, USAGE_FILE};

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::error::{CoreError, Result};
use crate::rewards::{RewardTracker, ARTWORK_FILE};

/// Environment variable overriding the data directory location.
pub const HOME_ENV: &str = "POMODORO_HOME";

const DIR_NAME: &str = ".pomodoro";

/// The directory holding every persisted file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    /// Returns `$POMODORO_HOME` if set, otherwise `~/.pomodoro/`.
    ///
    /// # Errors
    /// Returns [`CoreError::DataDirUnavailable`] when neither the override nor
    /// the home directory is available.
    pub fn resolve() -> Result<Self> {
        if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::at(dir));
        }
        let home = dirs::home_dir().ok_or(CoreError::DataDirUnavailable)?;
        Ok(Self::at(home.join(DIR_NAME)))
    }

    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn presets(&self) -> PresetFile {
        PresetFile::at(self.file(PRESETS_FILE))
    }

    pub fn usage(&self) -> UsageTracker {
        UsageTracker::at(self.file(USAGE_FILE))
    }

    pub fn rewards(&self) -> RewardTracker {
        RewardTracker::at(self.file(ARTWORK_FILE))
    }

    /// Delete the directory and everything in it.
    ///
    /// Returns `false` when there was nothing to remove.
    pub fn remove(&self) -> Result<bool> {
        if !self.exists() {
            return Ok(false);
        }
        fs::remove_dir_all(&self.root)?;
        Ok(true)
    }
}

/// Read a JSON document, substituting the default on any failure.
pub(crate) fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no readable file, using defaults");
            return T::default();
        }
    };
    serde_json::from_str(&content).unwrap_or_else(|e| {
        debug!(path = %path.display(), error = %e, "ignoring malformed file");
        T::default()
    })
}

/// Load a tracker's document. Detached trackers always see the default.
pub(crate) fn load_document<T: DeserializeOwned + Default>(path: Option<&Path>) -> T {
    path.map_or_else(T::default, read_json_or_default::<T>)
}

/// Persist a tracker's document. Detached trackers drop the write.
pub(crate) fn save_document<T: Serialize>(path: Option<&Path>, value: &T) -> Result<()> {
    match path {
        Some(path) => write_json_pretty(path, value),
        None => {
            debug!("no data directory, not saving");
            Ok(())
        }
    }
}

/// Treats an explicit `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Overwrite `path` with a pretty-printed JSON document.
pub(crate) fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content)?;
    Ok(())
}
