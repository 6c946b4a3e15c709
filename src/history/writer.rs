use std::sync::Arc;
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use super::play_log::{PlayEvent, PlayLog};

/// Appends play events on a background thread.
///
/// `submit` never blocks on the log and never reports failures to the
/// caller; append errors are logged and dropped. Dropping the writer waits
/// for queued events to be written.
pub struct PlayLogWriter {
    tx: Option<Sender<PlayEvent>>,
    join: Option<JoinHandle<()>>,
}

impl PlayLogWriter {
    pub fn spawn(log: Arc<dyn PlayLog>) -> Self {
        let (tx, rx) = mpsc::channel::<PlayEvent>();

        let spawned = thread::Builder::new()
            .name("play-log".into())
            .spawn(move || {
                for event in rx {
                    match log.append(&event) {
                        Ok(()) => debug!(track = %event.track_id, "play event stored"),
                        Err(e) => {
                            warn!(track = %event.track_id, user = %event.user_id, error = %e, "failed to store play event")
                        }
                    }
                }
            });

        match spawned {
            Ok(join) => Self {
                tx: Some(tx),
                join: Some(join),
            },
            Err(e) => {
                warn!(error = %e, "could not start play log writer; plays will not be stored");
                Self { tx: None, join: None }
            }
        }
    }

    pub fn submit(&self, event: PlayEvent) {
        let Some(tx) = &self.tx else {
            return;
        };
        if tx.send(event).is_err() {
            warn!("play log writer has stopped; dropping play event");
        }
    }
}

impl Drop for PlayLogWriter {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop once the backlog is written.
        self.tx.take();
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}
