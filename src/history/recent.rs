use std::collections::HashSet;

use crate::catalog::{Track, TrackId};
use crate::config::HistorySettings;

/// Caps for the two history tiers.
///
/// The local list keeps more entries than are shown from the durable log;
/// both limits are explicit so neither tier silently wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryConfig {
    pub local_cap: usize,
    pub remote_cap: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            local_cap: 10,
            remote_cap: 6,
        }
    }
}

impl HistoryConfig {
    pub fn from_settings(settings: &HistorySettings) -> Self {
        Self {
            local_cap: settings.local_cap.max(1),
            remote_cap: settings.remote_cap.max(1),
        }
    }
}

/// Most-recent-first list of tracks, unique by id, never longer than `cap`.
#[derive(Debug, Clone)]
pub struct RecentTracks {
    cap: usize,
    tracks: Vec<Track>,
}

impl RecentTracks {
    pub fn new(cap: usize) -> Self {
        Self {
            cap: cap.max(1),
            tracks: Vec::new(),
        }
    }

    /// Rebuild from an already most-recent-first list (e.g. a saved file),
    /// dropping later duplicates and anything past the cap.
    pub fn from_tracks(cap: usize, tracks: Vec<Track>) -> Self {
        let mut recent = Self::new(cap);
        let mut seen: HashSet<TrackId> = HashSet::new();
        recent.tracks = tracks
            .into_iter()
            .filter(|t| seen.insert(t.id.clone()))
            .take(recent.cap)
            .collect();
        recent
    }

    /// Move `track` to the front, removing any earlier entry with its id.
    pub fn record(&mut self, track: Track) {
        self.tracks.retain(|t| t.id != track.id);
        self.tracks.insert(0, track);
        self.tracks.truncate(self.cap);
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// First occurrence of each id, in order, at most `cap` of them.
pub(super) fn dedup_ids(ids: impl IntoIterator<Item = TrackId>, cap: usize) -> Vec<TrackId> {
    let mut seen: HashSet<TrackId> = HashSet::new();
    ids.into_iter()
        .filter(|id| seen.insert(id.clone()))
        .take(cap)
        .collect()
}
