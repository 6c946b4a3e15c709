use std::path::Path;

use tracing::info;

use crate::config::LibrarySettings;
use crate::error::{Error, Result};

use super::model::Track;
use super::scan::{scan, sort_newest_first};

/// Read side of the track catalog plus the privileged delete.
pub trait Catalog {
    /// All tracks, newest first.
    fn list(&self) -> Result<Vec<Track>>;

    /// Remove a track from the catalog. Fails with `NotFound` for unknown ids.
    fn delete(&mut self, id: &str) -> Result<()>;
}

/// Catalog held in memory, filled from a directory scan.
///
/// Deleting only drops the entry from the catalog; files on disk are left alone.
#[derive(Debug, Clone, Default)]
pub struct LocalCatalog {
    tracks: Vec<Track>,
}

impl LocalCatalog {
    pub fn scan(dir: &Path, settings: &LibrarySettings) -> Self {
        let tracks = scan(dir, settings);
        info!(dir = %dir.display(), count = tracks.len(), "catalog scanned");
        Self { tracks }
    }

    pub fn from_tracks(mut tracks: Vec<Track>) -> Self {
        sort_newest_first(&mut tracks);
        Self { tracks }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl Catalog for LocalCatalog {
    fn list(&self) -> Result<Vec<Track>> {
        Ok(self.tracks.clone())
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        let before = self.tracks.len();
        self.tracks.retain(|t| t.id != id);
        if self.tracks.len() == before {
            return Err(Error::NotFound(format!("track {id}")));
        }
        info!(id, "track removed from catalog");
        Ok(())
    }
}
