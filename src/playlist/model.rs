use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{Track, TrackId};
use crate::session::UserId;

pub type PlaylistId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: PlaylistId,
    pub owner: UserId,
    pub name: String,
    pub track_ids: Vec<TrackId>,
    pub created_at: DateTime<Utc>,
}

impl Playlist {
    /// Track ids with `id` appended, unless it is already present.
    pub fn with_track(&self, id: &str) -> Vec<TrackId> {
        let mut ids = self.track_ids.clone();
        if !ids.iter().any(|t| t == id) {
            ids.push(id.to_string());
        }
        ids
    }

    /// Track ids without `id`.
    pub fn without_track(&self, id: &str) -> Vec<TrackId> {
        self.track_ids.iter().filter(|t| *t != id).cloned().collect()
    }

    /// Look up this playlist's tracks in `catalog`, keeping playlist order.
    /// Ids the catalog does not know are skipped.
    pub fn resolve(&self, catalog: &[Track]) -> Vec<Track> {
        self.track_ids
            .iter()
            .filter_map(|id| catalog.iter().find(|t| &t.id == id).cloned())
            .collect()
    }
}
