use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type TrackId = String;

/// Coarse kind of a catalog entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Regular music.
    #[serde(alias = "Song", alias = "music")]
    Song,
    /// Background music.
    #[serde(alias = "BGM", alias = "background")]
    Bgm,
}

impl Category {
    /// Parse a user-supplied category name, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "song" | "songs" | "music" => Some(Self::Song),
            "bgm" | "background" => Some(Self::Bgm),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Song => f.write_str("song"),
            Self::Bgm => f.write_str("bgm"),
        }
    }
}

/// A playable catalog entry. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist: String,
    /// Album, soundtrack or collection name.
    pub group: Option<String>,
    pub category: Category,
    pub language: String,
    pub cover: Option<String>,
    /// Where the transport loads the audio from.
    pub media: String,
    pub created_at: DateTime<Utc>,
}

impl Track {
    /// `Artist - Title`, or just the title when the artist is blank.
    pub fn display(&self) -> String {
        match self.artist.trim() {
            "" => self.title.clone(),
            a => format!("{} - {}", a, self.title),
        }
    }
}
