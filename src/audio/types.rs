//! Messages exchanged with the audio thread.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::player::TransportEvent;

/// Identifies one `Load`. Events from an older load are stale.
pub(super) type Generation = u64;

#[derive(Debug)]
pub(super) enum AudioCmd {
    /// Replace the current media. The new sink starts paused.
    Load { path: PathBuf, generation: Generation },
    /// Drop whatever is loaded; the next media could not be opened.
    Unload { generation: Generation },
    Play,
    Pause,
    /// Jump to an absolute position in the current media.
    Seek(Duration),
    SetVolume(f32),
    /// Stop the thread, fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct AudioEvent {
    pub generation: Generation,
    pub event: TransportEvent,
}

/// Wall-clock position of the current sink.
///
/// rodio does not report where a rebuilt (seeked) sink started, so the
/// position is kept here: an offset plus the time spent playing since.
#[derive(Debug, Clone, Default)]
pub(super) struct Clock {
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl Clock {
    pub fn at(position: Duration) -> Self {
        Self {
            started_at: None,
            accumulated: position,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed())
    }

    pub fn resume(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    pub fn pause(&mut self) {
        if let Some(st) = self.started_at.take() {
            self.accumulated += st.elapsed();
        }
    }
}
