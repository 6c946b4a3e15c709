use tracing::{debug, info, warn};

use crate::catalog::Track;
use crate::error::Error;
use crate::history::HistoryRecorder;

use super::notify::{LogNotifier, Notice, Notifier};
use super::queue::{Direction, Queue};
use super::state::{PlaybackState, RepeatMode};
use super::transport::{Transport, TransportEvent};

/// Owned copy of what a front-end needs to render.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub state: PlaybackState,
    /// Queue in play order.
    pub queue: Vec<Track>,
    /// Local recent list, most recent first.
    pub history: Vec<Track>,
}

/// Configures a `Controller`.
pub struct ControllerBuilder<T: Transport> {
    transport: T,
    history: HistoryRecorder,
    notifier: Box<dyn Notifier>,
    volume: f32,
    shuffle: bool,
    repeat: RepeatMode,
}

impl<T: Transport> ControllerBuilder<T> {
    pub fn new(transport: T, history: HistoryRecorder) -> Self {
        Self {
            transport,
            history,
            notifier: Box::new(LogNotifier),
            volume: 1.0,
            shuffle: false,
            repeat: RepeatMode::Off,
        }
    }

    pub fn notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }

    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn repeat(mut self, repeat: RepeatMode) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn build(self) -> Controller<T> {
        let volume = if self.volume.is_nan() {
            1.0
        } else {
            self.volume.clamp(0.0, 1.0)
        };

        let mut controller = Controller {
            transport: self.transport,
            state: PlaybackState {
                volume,
                shuffle: self.shuffle,
                repeat: self.repeat,
                ..PlaybackState::default()
            },
            queue: Queue::default(),
            history: self.history,
            notifier: self.notifier,
            finished: false,
            failed: false,
        };
        controller.apply_volume();
        controller
    }
}

/// Mediates between user intent, the transport, the queue and history.
pub struct Controller<T: Transport> {
    transport: T,
    state: PlaybackState,
    queue: Queue,
    history: HistoryRecorder,
    notifier: Box<dyn Notifier>,
    // The current track played to its end and nothing followed it.
    finished: bool,
    // The current track never reached the transport, or the transport gave up on it.
    failed: bool,
}

impl<T: Transport> Controller<T> {
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    pub fn history(&self) -> &HistoryRecorder {
        &self.history
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state.clone(),
            queue: self.queue.in_play_order(),
            history: self.history.local().to_vec(),
        }
    }

    /// "Recently played" for display; see `HistoryRecorder::recent`.
    pub fn recent<F>(&self, resolve: F) -> Vec<Track>
    where
        F: Fn(&str) -> Option<Track>,
    {
        self.history.recent(resolve)
    }

    /// Play `track` with `queue` as the new play context.
    pub fn play(&mut self, track: Track, queue: Vec<Track>) {
        self.queue = Queue::new(queue);
        if self.state.shuffle {
            self.queue.shuffle_from(Some(&track.id));
        }
        self.start(track);
    }

    /// Make `track` current, record it, then hand it to the transport.
    fn start(&mut self, track: Track) {
        self.state.current = Some(track.clone());
        self.history.record(&track);
        self.load_and_play(&track);
    }

    fn load_and_play(&mut self, track: &Track) {
        self.state.playing = false;
        self.state.position = 0.0;
        self.state.duration = None;
        self.finished = false;
        self.failed = false;

        let started = self
            .transport
            .load(&track.media)
            .and_then(|()| self.transport.play());

        match started {
            Ok(()) => {
                self.state.playing = true;
                info!(id = %track.id, "now playing");
                self.notifier
                    .notify(Notice::info(format!("Now playing: {}", track.title)));
            }
            Err(e) => self.fail_playback(track, &e.to_string()),
        }
    }

    fn fail_playback(&mut self, track: &Track, reason: &str) {
        self.state.playing = false;
        self.failed = true;
        warn!(id = %track.id, media = %track.media, reason, "playback failed");
        self.notifier.notify(Notice::error(format!(
            "Could not play {}: {}",
            track.title, reason
        )));
    }

    fn transport_failed(&self, action: &str, e: Error) {
        warn!(action, error = %e, "transport request failed");
        self.notifier
            .notify(Notice::error(format!("Playback control failed: {e}")));
    }

    pub fn toggle_play_pause(&mut self) {
        let Some(track) = self.state.current.clone() else {
            return;
        };

        if self.state.playing {
            match self.transport.pause() {
                Ok(()) => self.state.playing = false,
                Err(e) => self.transport_failed("pause", e),
            }
            return;
        }

        if self.failed {
            // Nothing is loaded; resuming means trying the media again.
            self.load_and_play(&track);
            return;
        }

        if self.finished {
            // Resuming a track that already ran out starts it over.
            self.finished = false;
            self.state.position = 0.0;
            if let Err(e) = self.transport.set_position(0.0) {
                self.transport_failed("rewind", e);
                return;
            }
        }
        match self.transport.play() {
            Ok(()) => self.state.playing = true,
            Err(e) => self.transport_failed("resume", e),
        }
    }

    /// Jump to `seconds`, clamped to the known duration.
    ///
    /// The stored position changes immediately; the transport catches up.
    pub fn seek(&mut self, seconds: f64) {
        if self.state.current.is_none() || !seconds.is_finite() {
            return;
        }

        let upper = self.state.duration.unwrap_or(f64::INFINITY);
        let target = seconds.clamp(0.0, upper);
        self.state.position = target;
        self.finished = false;

        if let Err(e) = self.transport.set_position(target) {
            self.transport_failed("seek", e);
        }
    }

    /// Set the stored volume. Adjusting the volume always unmutes.
    pub fn set_volume(&mut self, level: f32) {
        if level.is_nan() {
            return;
        }
        self.state.volume = level.clamp(0.0, 1.0);
        self.state.muted = false;
        self.apply_volume();
    }

    pub fn toggle_mute(&mut self) {
        self.state.muted = !self.state.muted;
        self.apply_volume();
    }

    fn apply_volume(&mut self) {
        if let Err(e) = self.transport.set_volume(self.state.effective_volume()) {
            self.transport_failed("volume", e);
        }
    }

    /// Play the following track of the queue. Returns whether the track changed.
    pub fn next(&mut self) -> bool {
        self.step(Direction::Next)
    }

    /// Play the preceding track of the queue. Returns whether the track changed.
    pub fn previous(&mut self) -> bool {
        self.step(Direction::Previous)
    }

    fn step(&mut self, direction: Direction) -> bool {
        let Some(current) = self.state.current_id() else {
            return false;
        };
        let wrap = self.state.repeat == RepeatMode::All;

        let Some(target) = self.queue.neighbor(current, direction, wrap).cloned() else {
            debug!(?direction, "no neighbouring track; staying put");
            return false;
        };
        self.start(target);
        true
    }

    pub fn toggle_shuffle(&mut self) {
        self.state.shuffle = !self.state.shuffle;
        if self.state.shuffle {
            let current = self.state.current.as_ref().map(|t| t.id.clone());
            self.queue.shuffle_from(current.as_deref());
        } else {
            self.queue.unshuffle();
        }
    }

    pub fn toggle_repeat(&mut self) {
        self.state.repeat = self.state.repeat.cycle();
    }

    pub fn handle_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::TimeUpdate(position) => {
                if self.state.current.is_some() && position.is_finite() && position >= 0.0 {
                    self.state.position = position;
                }
            }
            TransportEvent::MetadataLoaded(duration) => {
                self.state.duration = (duration.is_finite() && duration >= 0.0).then_some(duration);
            }
            TransportEvent::Ended => self.on_ended(),
            TransportEvent::Error(reason) => {
                if let Some(track) = self.state.current.clone() {
                    self.fail_playback(&track, &reason);
                }
            }
        }
    }

    fn on_ended(&mut self) {
        let Some(track) = self.state.current.clone() else {
            return;
        };

        if self.state.repeat == RepeatMode::One {
            self.start(track);
            return;
        }

        if !self.next() {
            self.state.playing = false;
            self.finished = true;
            if let Some(duration) = self.state.duration {
                self.state.position = duration;
            }
            info!(id = %track.id, "end of queue");
        }
    }
}
