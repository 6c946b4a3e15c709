use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::TrackId;
use crate::error::Result;
use crate::session::UserId;

use super::recent::dedup_ids;

/// One play of one track by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayEvent {
    pub user_id: UserId,
    pub track_id: TrackId,
    pub played_at: DateTime<Utc>,
}

/// Durable per-user record of plays.
///
/// Writes are not deduplicated; every play is its own event.
pub trait PlayLog: Send + Sync {
    fn append(&self, event: &PlayEvent) -> Result<()>;

    /// Distinct track ids the user played, most recent first, at most `limit`.
    fn recent_track_ids(&self, user_id: &str, limit: usize) -> Result<Vec<TrackId>>;
}

/// Play log kept as JSON Lines, one event per line.
#[derive(Debug)]
pub struct JsonPlayLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonPlayLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn read_events(&self) -> Result<Vec<PlayEvent>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut events = Vec::new();
        for (n, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<PlayEvent>(line) {
                Ok(ev) => events.push(ev),
                Err(e) => warn!(path = %self.path.display(), line = n + 1, error = %e, "skipping bad play log line"),
            }
        }
        Ok(events)
    }
}

impl PlayLog for JsonPlayLog {
    fn append(&self, event: &PlayEvent) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut line = serde_json::to_string(event)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    fn recent_track_ids(&self, user_id: &str, limit: usize) -> Result<Vec<TrackId>> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut events: Vec<PlayEvent> = self
            .read_events()?
            .into_iter()
            .filter(|e| e.user_id == user_id)
            .collect();
        // Later lines first, so equal timestamps keep append order reversed.
        events.reverse();
        events.sort_by(|a, b| b.played_at.cmp(&a.played_at));

        Ok(dedup_ids(events.into_iter().map(|e| e.track_id), limit))
    }
}
