//! Shared fixtures for unit tests.

use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};

use crate::catalog::{Category, Track, TrackId};
use crate::error::{Error, Result};
use crate::history::{LocalHistoryStore, PlayEvent, PlayLog};
use crate::player::{Notice, Notifier, Transport};
use crate::session::{SessionProvider, StaticSession};

/// A song whose title, artist and media path derive from `id`.
pub fn track(id: &str) -> Track {
    Track {
        id: id.to_string(),
        title: format!("Title {id}"),
        artist: format!("Artist {id}"),
        group: None,
        category: Category::Song,
        language: "en".to_string(),
        cover: None,
        media: format!("/music/{id}.mp3"),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

/// Like `track`, created `minutes` after the fixture epoch.
pub fn track_at(id: &str, minutes: i64) -> Track {
    let mut t = track(id);
    t.created_at += chrono::Duration::minutes(minutes);
    t
}

pub fn tracks(ids: &[&str]) -> Vec<Track> {
    ids.iter().map(|id| track(id)).collect()
}

/// Local history kept in memory; clones share the same list.
#[derive(Clone, Default)]
pub struct MemoryHistory {
    pub saved: Arc<Mutex<Vec<Track>>>,
    pub fail_saves: bool,
}

impl LocalHistoryStore for MemoryHistory {
    fn load(&self) -> Result<Vec<Track>> {
        Ok(self.saved.lock().unwrap().clone())
    }

    fn save(&self, tracks: &[Track]) -> Result<()> {
        if self.fail_saves {
            return Err(Error::Io(std::io::Error::other("disk full")));
        }
        *self.saved.lock().unwrap() = tracks.to_vec();
        Ok(())
    }
}

/// Play log kept in memory; can be told to fail reads or writes.
#[derive(Default)]
pub struct MemoryPlayLog {
    pub events: Mutex<Vec<PlayEvent>>,
    pub fail_appends: bool,
    pub fail_reads: bool,
}

impl PlayLog for MemoryPlayLog {
    fn append(&self, event: &PlayEvent) -> Result<()> {
        if self.fail_appends {
            return Err(Error::Io(std::io::Error::other("offline")));
        }
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }

    fn recent_track_ids(&self, user_id: &str, limit: usize) -> Result<Vec<TrackId>> {
        if self.fail_reads {
            return Err(Error::Io(std::io::Error::other("offline")));
        }
        let events = self.events.lock().unwrap();
        let mut ids: Vec<TrackId> = Vec::new();
        for e in events.iter().rev().filter(|e| e.user_id == user_id) {
            if !ids.contains(&e.track_id) {
                ids.push(e.track_id.clone());
            }
        }
        ids.truncate(limit);
        Ok(ids)
    }
}

pub fn signed_in(user: &str) -> Arc<dyn SessionProvider> {
    Arc::new(StaticSession::new(Some(user.to_string()), false))
}

pub fn anonymous() -> Arc<dyn SessionProvider> {
    Arc::new(StaticSession::anonymous())
}

/// A transport call, as seen by `FakeTransport`.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Load(String),
    Play,
    Pause,
    Position(f64),
    Volume(f32),
}

/// Transport that records every request and can refuse chosen media.
#[derive(Debug, Default)]
pub struct FakeTransport {
    pub calls: Vec<Call>,
    pub refuse_media: Option<String>,
}

impl FakeTransport {
    pub fn loads(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Load(m) => Some(m.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn last_volume(&self) -> Option<f32> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::Volume(v) => Some(*v),
            _ => None,
        })
    }
}

impl Transport for FakeTransport {
    fn load(&mut self, media: &str) -> Result<()> {
        self.calls.push(Call::Load(media.to_string()));
        if self.refuse_media.as_deref() == Some(media) {
            return Err(Error::Transport(format!("cannot open {media}")));
        }
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.calls.push(Call::Play);
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.calls.push(Call::Pause);
        Ok(())
    }

    fn set_position(&mut self, seconds: f64) -> Result<()> {
        self.calls.push(Call::Position(seconds));
        Ok(())
    }

    fn set_volume(&mut self, level: f32) -> Result<()> {
        self.calls.push(Call::Volume(level));
        Ok(())
    }
}

/// Notifier that keeps every notice for inspection.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    pub notices: Arc<Mutex<Vec<Notice>>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}
