use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use crate::catalog::Track;
use crate::session::SessionProvider;

use super::play_log::{PlayEvent, PlayLog};
use super::recent::{HistoryConfig, RecentTracks, dedup_ids};
use super::store::LocalHistoryStore;
use super::writer::PlayLogWriter;

struct Durable {
    log: Arc<dyn PlayLog>,
    writer: PlayLogWriter,
}

/// Single writer for both history tiers.
///
/// Every recorded play updates and saves the local list synchronously. When
/// a user is signed in and a play log is attached, the play is also handed
/// to the background writer.
pub struct HistoryRecorder {
    config: HistoryConfig,
    recent: RecentTracks,
    local: Box<dyn LocalHistoryStore>,
    durable: Option<Durable>,
    session: Arc<dyn SessionProvider>,
}

impl HistoryRecorder {
    pub fn new(
        config: HistoryConfig,
        local: Box<dyn LocalHistoryStore>,
        session: Arc<dyn SessionProvider>,
    ) -> Self {
        let saved = local.load().unwrap_or_else(|e| {
            warn!(error = %e, "could not load local history; starting empty");
            Vec::new()
        });

        Self {
            config,
            recent: RecentTracks::from_tracks(config.local_cap, saved),
            local,
            durable: None,
            session,
        }
    }

    pub fn with_play_log(mut self, log: Arc<dyn PlayLog>) -> Self {
        let writer = PlayLogWriter::spawn(log.clone());
        self.durable = Some(Durable { log, writer });
        self
    }

    /// Local recent list, most recent first.
    pub fn local(&self) -> &[Track] {
        self.recent.tracks()
    }

    pub fn record(&mut self, track: &Track) {
        self.recent.record(track.clone());
        if let Err(e) = self.local.save(self.recent.tracks()) {
            warn!(error = %e, "could not save local history");
        }

        let Some(durable) = &self.durable else {
            return;
        };
        let Some(user_id) = self.session.current_user() else {
            return;
        };
        durable.writer.submit(PlayEvent {
            user_id,
            track_id: track.id.clone(),
            played_at: Utc::now(),
        });
    }

    /// Tracks to show as "recently played".
    ///
    /// Prefers the durable log for a signed-in user (capped at
    /// `remote_cap`), resolving ids through `resolve` and skipping ids it
    /// no longer knows. Without a session or log, or when the log cannot be
    /// read, falls back to the local list (capped at `local_cap`).
    pub fn recent<F>(&self, resolve: F) -> Vec<Track>
    where
        F: Fn(&str) -> Option<Track>,
    {
        if let (Some(durable), Some(user)) = (&self.durable, self.session.current_user()) {
            match durable.log.recent_track_ids(&user, self.config.remote_cap) {
                Ok(ids) => {
                    return dedup_ids(ids, self.config.remote_cap)
                        .iter()
                        .filter_map(|id| resolve(id))
                        .collect();
                }
                Err(e) => {
                    warn!(user = %user, error = %e, "could not read play log; showing local history")
                }
            }
        }

        self.recent
            .tracks()
            .iter()
            .take(self.config.local_cap)
            .cloned()
            .collect()
    }
}
