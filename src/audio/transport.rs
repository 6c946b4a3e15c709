use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::AudioSettings;
use crate::error::{Error, Result};
use crate::player::{Transport, TransportEvent};

use super::sink::resolve_media;
use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, AudioEvent, Generation};

/// Handle to the audio thread.
pub struct RodioTransport {
    tx: Sender<AudioCmd>,
    events: Receiver<AudioEvent>,
    generation: Generation,
    quit_fade_out_ms: u64,
    join: Option<JoinHandle<()>>,
}

impl RodioTransport {
    pub fn spawn(settings: &AudioSettings) -> Result<Self> {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (event_tx, events) = mpsc::channel::<AudioEvent>();

        let join = spawn_audio_thread(rx, event_tx, settings.clone())?;
        Ok(Self::with_channels(
            tx,
            events,
            settings.quit_fade_out_ms,
            Some(join),
        ))
    }

    pub(super) fn with_channels(
        tx: Sender<AudioCmd>,
        events: Receiver<AudioEvent>,
        quit_fade_out_ms: u64,
        join: Option<JoinHandle<()>>,
    ) -> Self {
        Self {
            tx,
            events,
            generation: 0,
            quit_fade_out_ms,
            join,
        }
    }

    fn send(&self, cmd: AudioCmd) -> Result<()> {
        self.tx
            .send(cmd)
            .map_err(|_| Error::Transport("audio thread has stopped".into()))
    }

    /// Events reported since the last call, oldest first.
    ///
    /// Events that belong to a media replaced by a later `load` are dropped.
    pub fn drain_events(&self) -> Vec<TransportEvent> {
        let mut out = Vec::new();
        loop {
            match self.events.try_recv() {
                Ok(e) if e.generation == self.generation => out.push(e.event),
                Ok(e) => debug!(generation = e.generation, "dropping stale audio event"),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.join.is_some() {
                        warn!("audio thread disconnected");
                    }
                    break;
                }
            }
        }
        out
    }

    /// Fade out and wait for the audio thread to finish.
    pub fn quit_softly(&mut self) {
        let Some(join) = self.join.take() else {
            return;
        };
        let _ = self.send(AudioCmd::Quit {
            fade_out_ms: self.quit_fade_out_ms,
        });
        if join.join().is_err() {
            warn!("audio thread panicked");
        }
    }
}

impl Transport for RodioTransport {
    /// Replace the loaded media. A refused locator still silences the
    /// previous one, and its pending events become stale.
    fn load(&mut self, media: &str) -> Result<()> {
        self.generation += 1;
        let generation = self.generation;
        match resolve_media(media) {
            Ok(path) => self.send(AudioCmd::Load { path, generation }),
            Err(e) => {
                self.send(AudioCmd::Unload { generation })?;
                Err(e)
            }
        }
    }

    fn play(&mut self) -> Result<()> {
        self.send(AudioCmd::Play)
    }

    fn pause(&mut self) -> Result<()> {
        self.send(AudioCmd::Pause)
    }

    fn set_position(&mut self, seconds: f64) -> Result<()> {
        let invalid = || Error::InvalidInput(format!("invalid position {seconds}"));
        if seconds.is_nan() {
            return Err(invalid());
        }
        let to = Duration::try_from_secs_f64(seconds.max(0.0)).map_err(|_| invalid())?;
        self.send(AudioCmd::Seek(to))
    }

    fn set_volume(&mut self, level: f32) -> Result<()> {
        self.send(AudioCmd::SetVolume(level.clamp(0.0, 1.0)))
    }
}

impl Drop for RodioTransport {
    fn drop(&mut self) {
        self.quit_softly();
    }
}
