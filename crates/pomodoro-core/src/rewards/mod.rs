//! ASCII artwork unlocked line by line as pomodoros are completed.
//!
//! Artworks are revealed one at a time in catalog order. Progress is kept in
//! `artwork.json` as the index of the artwork being revealed plus the number
//! of lines unlocked per artwork file.

mod provider;

pub use provider::{
    art_lines, ArtProvider, BundledArt, Dimensions, DiskArt, LayeredArt, DIMENSIONS_PREFIX,
};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::storage::{load_document, null_as_default, save_document};

pub const ARTWORK_FILE: &str = "artwork.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Artwork {
    pub name: &'static str,
    pub filename: &'static str,
    /// Lines in the file, counting the `DIMENSIONS:` line.
    pub total_lines: usize,
}

impl Artwork {
    /// Lines that can be revealed.
    pub fn art_lines(&self) -> usize {
        self.total_lines.saturating_sub(1)
    }
}

/// Reveal order.
pub const ARTWORKS: &[Artwork] = &[
    Artwork {
        name: "Mountain Sunrise",
        filename: "art/mountain.txt",
        total_lines: 12,
    },
    Artwork {
        name: "Sailboat",
        filename: "art/sailboat.txt",
        total_lines: 14,
    },
    Artwork {
        name: "Coffee Break",
        filename: "art/coffee.txt",
        total_lines: 12,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtworkStatus {
    Completed,
    InProgress { unlocked: usize, total: usize },
    Locked,
}

/// The whole `artwork.json` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkProgress {
    #[serde(default)]
    pub current_artwork_index: usize,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unlocked_lines: BTreeMap<String, usize>,
}

impl ArtworkProgress {
    pub fn unlocked(&self, artwork: &Artwork) -> usize {
        self.unlocked_lines
            .get(artwork.filename)
            .copied()
            .unwrap_or(0)
    }

    pub fn is_complete(&self, catalog: &[Artwork]) -> bool {
        self.current_artwork_index >= catalog.len()
    }

    /// Reveal `lines` more lines of the current artwork.
    ///
    /// The count is capped at the artwork's revealable lines; reaching the cap
    /// moves on to the next artwork and returns the finished one.
    pub fn unlock(&mut self, catalog: &[Artwork], lines: usize) -> Option<Artwork> {
        let artwork = *catalog.get(self.current_artwork_index)?;
        let cap = artwork.art_lines();
        let unlocked = self.unlocked(&artwork).saturating_add(lines);

        if unlocked >= cap {
            self.unlocked_lines.insert(artwork.filename.to_string(), cap);
            self.current_artwork_index += 1;
            Some(artwork)
        } else {
            self.unlocked_lines
                .insert(artwork.filename.to_string(), unlocked);
            None
        }
    }

    pub fn status(&self, catalog: &[Artwork], index: usize) -> ArtworkStatus {
        let Some(artwork) = catalog.get(index) else {
            return ArtworkStatus::Locked;
        };
        if index < self.current_artwork_index {
            return ArtworkStatus::Completed;
        }
        if index > self.current_artwork_index {
            return ArtworkStatus::Locked;
        }
        let unlocked = self.unlocked(artwork);
        let total = artwork.art_lines();
        if unlocked >= total {
            ArtworkStatus::Completed
        } else {
            ArtworkStatus::InProgress { unlocked, total }
        }
    }

    /// The artwork being revealed and its unlocked line count.
    pub fn current<'c>(&self, catalog: &'c [Artwork]) -> Option<(&'c Artwork, usize)> {
        let artwork = catalog.get(self.current_artwork_index)?;
        Some((artwork, self.unlocked(artwork)))
    }
}

/// `artwork.json` on disk.
#[derive(Debug, Clone)]
pub struct RewardTracker {
    path: Option<PathBuf>,
    catalog: &'static [Artwork],
}

impl RewardTracker {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            catalog: ARTWORKS,
        }
    }

    /// A tracker with no backing file. Progress never survives the process.
    pub fn detached() -> Self {
        Self {
            path: None,
            catalog: ARTWORKS,
        }
    }

    pub fn with_catalog(mut self, catalog: &'static [Artwork]) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn catalog(&self) -> &'static [Artwork] {
        self.catalog
    }

    /// Missing or corrupt files load as no progress.
    pub fn load(&self) -> ArtworkProgress {
        load_document(self.path())
    }

    pub fn save(&self, progress: &ArtworkProgress) -> Result<()> {
        save_document(self.path(), progress)
    }

    /// Unlock `lines` and persist. Does nothing once every artwork is done.
    pub fn unlock(&self, lines: usize) -> Result<Option<Artwork>> {
        let mut progress = self.load();
        if progress.is_complete(self.catalog) {
            return Ok(None);
        }
        let completed = progress.unlock(self.catalog, lines);
        self.save(&progress)?;
        Ok(completed)
    }

    /// The artwork being revealed, or `None` when all are complete.
    pub fn current(&self) -> Option<(Artwork, usize)> {
        let progress = self.load();
        progress
            .current(self.catalog)
            .map(|(artwork, unlocked)| (*artwork, unlocked))
    }
}
