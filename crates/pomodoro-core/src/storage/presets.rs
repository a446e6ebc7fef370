//! Named duration presets and the last used preset.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{load_document, null_as_default, save_document};
use crate::error::{Result, ValidationError};
use crate::session::SessionPlan;

pub const PRESETS_FILE: &str = "presets.json";

/// Name stored on the last used preset snapshot.
pub const LAST_USED_NAME: &str = "Last Used";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preset {
    pub name: String,
    pub work_minutes: u32,
    pub break_minutes: u32,
    pub longer_break_minutes: u32,
}

impl Preset {
    pub fn new(
        name: impl Into<String>,
        work_minutes: u32,
        break_minutes: u32,
        longer_break_minutes: u32,
    ) -> Self {
        Self {
            name: name.into(),
            work_minutes,
            break_minutes,
            longer_break_minutes,
        }
    }

    pub fn plan(&self) -> SessionPlan {
        SessionPlan::from_minutes(
            self.work_minutes,
            self.break_minutes,
            self.longer_break_minutes,
        )
    }
}

/// The whole `presets.json` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetStore {
    #[serde(default, deserialize_with = "null_as_default")]
    pub presets: Vec<Preset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used_preset: Option<Preset>,
}

impl PresetStore {
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Preset> {
        self.presets.get(index)
    }

    /// Update the preset called `name` in place, or append a new one.
    ///
    /// Returns `true` when an existing preset was overwritten.
    pub fn upsert(
        &mut self,
        name: &str,
        work_minutes: u32,
        break_minutes: u32,
        longer_break_minutes: u32,
    ) -> bool {
        if let Some(existing) = self.presets.iter_mut().find(|p| p.name == name) {
            existing.work_minutes = work_minutes;
            existing.break_minutes = break_minutes;
            existing.longer_break_minutes = longer_break_minutes;
            return true;
        }
        self.presets.push(Preset::new(
            name,
            work_minutes,
            break_minutes,
            longer_break_minutes,
        ));
        false
    }

    /// Remove the preset at zero-based `index`, keeping the rest in order.
    pub fn delete(&mut self, index: usize) -> Result<Preset, ValidationError> {
        if index >= self.presets.len() {
            return Err(ValidationError::OutOfBounds {
                collection: "presets".into(),
                index,
                len: self.presets.len(),
            });
        }
        Ok(self.presets.remove(index))
    }

    pub fn record_last_used(
        &mut self,
        work_minutes: u32,
        break_minutes: u32,
        longer_break_minutes: u32,
    ) {
        self.last_used_preset = Some(Preset::new(
            LAST_USED_NAME,
            work_minutes,
            break_minutes,
            longer_break_minutes,
        ));
    }
}

/// `presets.json` on disk. Every mutation reloads, edits and rewrites the file.
#[derive(Debug, Clone)]
pub struct PresetFile {
    path: Option<PathBuf>,
}

impl PresetFile {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// A store with no backing file. It always loads empty.
    pub fn detached() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Missing or corrupt files load as an empty store.
    pub fn load(&self) -> PresetStore {
        load_document(self.path())
    }

    pub fn save(&self, store: &PresetStore) -> Result<()> {
        save_document(self.path(), store)
    }

    pub fn upsert(
        &self,
        name: &str,
        work_minutes: u32,
        break_minutes: u32,
        longer_break_minutes: u32,
    ) -> Result<()> {
        let mut store = self.load();
        store.upsert(name, work_minutes, break_minutes, longer_break_minutes);
        self.save(&store)
    }

    pub fn delete(&self, index: usize) -> Result<Preset> {
        let mut store = self.load();
        let removed = store.delete(index)?;
        self.save(&store)?;
        Ok(removed)
    }

    pub fn record_last_used(
        &self,
        work_minutes: u32,
        break_minutes: u32,
        longer_break_minutes: u32,
    ) -> Result<()> {
        let mut store = self.load();
        store.record_last_used(work_minutes, break_minutes, longer_break_minutes);
        self.save(&store)
    }
}
