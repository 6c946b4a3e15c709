use std::collections::BTreeSet;

use super::model::{Category, Track};

/// Browse filter: free text against title/artist/group plus exact
/// category and language tags. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackFilter {
    pub query: String,
    pub category: Option<Category>,
    pub language: Option<String>,
}

impl TrackFilter {
    pub fn matches(&self, track: &Track) -> bool {
        self.matches_query(track)
            && self.category.is_none_or(|c| track.category == c)
            && self
                .language
                .as_deref()
                .is_none_or(|l| track.language == l)
    }

    fn matches_query(&self, track: &Track) -> bool {
        let query = self.query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        track.title.to_lowercase().contains(&query)
            || track.artist.to_lowercase().contains(&query)
            || track
                .group
                .as_deref()
                .is_some_and(|g| g.to_lowercase().contains(&query))
    }

    /// Keep the matching tracks, preserving their order.
    pub fn apply(&self, tracks: &[Track]) -> Vec<Track> {
        tracks.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}

/// Sorted set of language tags present in `tracks`.
pub fn distinct_languages(tracks: &[Track]) -> Vec<String> {
    tracks
        .iter()
        .map(|t| t.language.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
