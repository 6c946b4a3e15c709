use std::path::PathBuf;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::TrackId;
use crate::error::{Error, Result};
use crate::persist::{read_json_or_default, write_json_atomic};

use super::model::{Playlist, PlaylistId};

pub trait PlaylistStore {
    /// Create an empty playlist and return its id.
    fn create(&mut self, owner: &str, name: &str) -> Result<PlaylistId>;

    /// The owner's playlists, newest first.
    fn list_by_owner(&self, owner: &str) -> Result<Vec<Playlist>>;

    /// Replace the track list of a playlist.
    fn update(&mut self, id: &str, track_ids: Vec<TrackId>) -> Result<()>;

    fn delete(&mut self, id: &str) -> Result<()>;
}

/// All playlists in one JSON file, rewritten after every change.
#[derive(Debug)]
pub struct JsonPlaylistStore {
    path: PathBuf,
    playlists: Vec<Playlist>,
}

impl JsonPlaylistStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let playlists: Vec<Playlist> = read_json_or_default(&path)?;
        Ok(Self { path, playlists })
    }

    /// Open `path`, starting empty when the file cannot be read.
    pub fn open_or_empty(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::open(path.clone()) {
            Ok(store) => store,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read playlists; starting empty");
                Self {
                    path,
                    playlists: Vec::new(),
                }
            }
        }
    }

    fn persist(&self) -> Result<()> {
        write_json_atomic(&self.path, &self.playlists)
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut Playlist> {
        self.playlists
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::NotFound(format!("playlist {id}")))
    }
}

impl PlaylistStore for JsonPlaylistStore {
    fn create(&mut self, owner: &str, name: &str) -> Result<PlaylistId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("playlist name cannot be empty".into()));
        }

        let playlist = Playlist {
            id: Uuid::new_v4().to_string(),
            owner: owner.to_string(),
            name: name.to_string(),
            track_ids: Vec::new(),
            created_at: Utc::now(),
        };
        let id = playlist.id.clone();

        self.playlists.push(playlist);
        if let Err(e) = self.persist() {
            self.playlists.pop();
            return Err(e);
        }
        info!(%id, name, "playlist created");
        Ok(id)
    }

    fn list_by_owner(&self, owner: &str) -> Result<Vec<Playlist>> {
        let mut owned: Vec<Playlist> = self
            .playlists
            .iter()
            .filter(|p| p.owner == owner)
            .cloned()
            .collect();
        // Stable sort: playlists created in the same instant keep newest-pushed first.
        owned.reverse();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    fn update(&mut self, id: &str, track_ids: Vec<TrackId>) -> Result<()> {
        let playlist = self.find_mut(id)?;
        let previous = std::mem::replace(&mut playlist.track_ids, track_ids);

        if let Err(e) = self.persist() {
            // Keep memory and disk in agreement.
            if let Ok(p) = self.find_mut(id) {
                p.track_ids = previous;
            }
            return Err(e);
        }
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        let pos = self
            .playlists
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| Error::NotFound(format!("playlist {id}")))?;
        let removed = self.playlists.remove(pos);

        if let Err(e) = self.persist() {
            self.playlists.insert(pos, removed);
            return Err(e);
        }
        info!(id, "playlist deleted");
        Ok(())
    }
}
