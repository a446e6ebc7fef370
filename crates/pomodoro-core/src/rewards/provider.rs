//! Read-only sources of artwork text.
//!
//! Art ships inside the binary; a file with the same relative name next to
//! the working directory or the executable is used when the bundled copy is
//! missing.

use std::path::{Path, PathBuf};

use tracing::debug;

/// Marker of the optional metadata line at the top of an art file.
pub const DIMENSIONS_PREFIX: &str = "DIMENSIONS:";

pub trait ArtProvider {
    fn read(&self, filename: &str) -> Option<String>;
}

const BUNDLED: &[(&str, &str)] = &[
    ("art/mountain.txt", include_str!("art/mountain.txt")),
    ("art/sailboat.txt", include_str!("art/sailboat.txt")),
    ("art/coffee.txt", include_str!("art/coffee.txt")),
];

/// Art compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledArt;

impl ArtProvider for BundledArt {
    fn read(&self, filename: &str) -> Option<String> {
        BUNDLED
            .iter()
            .find(|(name, _)| *name == filename)
            .map(|(_, content)| (*content).to_string())
    }
}

/// Art files looked up relative to a list of directories, first hit wins.
#[derive(Debug, Clone, Default)]
pub struct DiskArt {
    dirs: Vec<PathBuf>,
}

impl DiskArt {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    /// The current directory, then the directory of the running executable.
    pub fn standard() -> Self {
        let mut dirs = vec![PathBuf::from(".")];
        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            dirs.push(exe_dir);
        }
        Self { dirs }
    }
}

impl ArtProvider for DiskArt {
    fn read(&self, filename: &str) -> Option<String> {
        self.dirs.iter().find_map(|dir| {
            let path = dir.join(filename);
            match std::fs::read_to_string(&path) {
                Ok(content) => Some(content),
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "art file not readable");
                    None
                }
            }
        })
    }
}

/// Tries `primary`, then `fallback`.
#[derive(Debug, Clone, Default)]
pub struct LayeredArt<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> LayeredArt<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl LayeredArt<BundledArt, DiskArt> {
    pub fn standard() -> Self {
        Self::new(BundledArt, DiskArt::standard())
    }
}

impl<P: ArtProvider, F: ArtProvider> ArtProvider for LayeredArt<P, F> {
    fn read(&self, filename: &str) -> Option<String> {
        self.primary
            .read(filename)
            .or_else(|| self.fallback.read(filename))
    }
}

/// The drawable lines of an art file, without metadata.
pub fn art_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .filter(|line| !line.starts_with(DIMENSIONS_PREFIX))
}

/// Character size declared by a `DIMENSIONS: WxH` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub columns: u32,
    pub rows: u32,
}

impl Dimensions {
    /// Only the first four lines are searched.
    pub fn parse(content: &str) -> Option<Self> {
        content.lines().take(4).find_map(|line| {
            let size = line.strip_prefix(DIMENSIONS_PREFIX)?;
            let (columns, rows) = size.split_once('x')?;
            Some(Self {
                columns: columns.trim().parse().ok()?,
                rows: rows.trim().parse().ok()?,
            })
        })
    }
}
