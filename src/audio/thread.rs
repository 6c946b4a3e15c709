use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, warn};

use crate::config::AudioSettings;
use crate::player::TransportEvent;

use super::sink::create_sink_at;
use super::types::{AudioCmd, AudioEvent, Clock, Generation};

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<AudioEvent>,
    settings: AudioSettings,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("encore-audio".into())
        .spawn(move || {
            let stream = match OutputStreamBuilder::open_default_stream() {
                Ok(mut stream) => {
                    // rodio logs to stderr when the stream is dropped; that
                    // would land in the middle of the console.
                    stream.log_on_drop(false);
                    Some(stream)
                }
                Err(e) => {
                    warn!(error = %e, "no audio output device");
                    None
                }
            };

            let tick = Duration::from_millis(settings.tick_ms.max(1));
            let mut audio = AudioThread::new(stream, events, settings);

            loop {
                match rx.recv_timeout(tick) {
                    Ok(AudioCmd::Quit { fade_out_ms }) => {
                        audio.quit(fade_out_ms);
                        break;
                    }
                    Ok(cmd) => audio.handle(cmd),
                    Err(RecvTimeoutError::Timeout) => audio.tick(),
                    Err(RecvTimeoutError::Disconnected) => {
                        audio.quit(0);
                        break;
                    }
                }
            }
            debug!("audio thread stopped");
        })
}

struct AudioThread {
    stream: Option<OutputStream>,
    events: Sender<AudioEvent>,
    settings: AudioSettings,
    generation: Generation,
    path: Option<PathBuf>,
    sink: Option<Sink>,
    // Previous sink, still audible until the next Play fades it out.
    outgoing: Option<Sink>,
    paused: bool,
    ended: bool,
    clock: Clock,
    volume: f32,
}

impl AudioThread {
    fn new(stream: Option<OutputStream>, events: Sender<AudioEvent>, settings: AudioSettings) -> Self {
        Self {
            stream,
            events,
            settings,
            generation: 0,
            path: None,
            sink: None,
            outgoing: None,
            paused: true,
            ended: false,
            clock: Clock::default(),
            volume: 1.0,
        }
    }

    fn emit(&self, event: TransportEvent) {
        // The handle is gone only while shutting down.
        let _ = self.events.send(AudioEvent {
            generation: self.generation,
            event,
        });
    }

    fn handle(&mut self, cmd: AudioCmd) {
        match cmd {
            AudioCmd::Load { path, generation } => self.load(path, generation),
            AudioCmd::Unload { generation } => self.unload(generation),
            AudioCmd::Play => self.play(),
            AudioCmd::Pause => self.pause(),
            AudioCmd::Seek(to) => self.seek(to),
            AudioCmd::SetVolume(level) => {
                self.volume = level;
                if let Some(s) = self.sink.as_ref() {
                    s.set_volume(level);
                }
            }
            AudioCmd::Quit { .. } => {}
        }
    }

    fn load(&mut self, path: PathBuf, generation: Generation) {
        self.generation = generation;
        self.ended = false;
        self.clock = Clock::default();
        self.path = None;

        if let Some(old) = self.outgoing.take() {
            old.stop();
        }
        if let Some(old) = self.sink.take() {
            if !self.paused && self.settings.crossfade_ms > 0 {
                self.outgoing = Some(old);
            } else {
                old.stop();
            }
        }
        self.paused = true;

        let Some(stream) = self.stream.as_ref() else {
            self.emit(TransportEvent::Error("no audio output device".into()));
            return;
        };

        match create_sink_at(stream, &path, Duration::ZERO) {
            Ok((sink, total)) => {
                sink.set_volume(self.volume);
                self.sink = Some(sink);
                self.path = Some(path);
                if let Some(total) = total {
                    self.emit(TransportEvent::MetadataLoaded(total.as_secs_f64()));
                }
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not load media");
                self.stop_outgoing();
                self.emit(TransportEvent::Error(e.to_string()));
            }
        }
    }

    fn unload(&mut self, generation: Generation) {
        self.generation = generation;
        self.stop_outgoing();
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        self.path = None;
        self.paused = true;
        self.ended = false;
        self.clock = Clock::default();
    }

    fn play(&mut self) {
        let Some(sink) = self.sink.as_ref() else {
            return;
        };

        match self.outgoing.take() {
            Some(old) => crossfade(&old, sink, self.volume, &self.settings),
            None => sink.play(),
        }
        self.paused = false;
        self.ended = false;
        self.clock.resume();
    }

    fn pause(&mut self) {
        self.stop_outgoing();
        if let Some(s) = self.sink.as_ref() {
            s.pause();
        }
        self.paused = true;
        self.clock.pause();
    }

    fn stop_outgoing(&mut self) {
        if let Some(old) = self.outgoing.take() {
            old.stop();
        }
    }

    /// Rebuild the sink and skip into the file.
    fn seek(&mut self, to: Duration) {
        let (Some(stream), Some(path)) = (self.stream.as_ref(), self.path.as_ref()) else {
            return;
        };

        let sink = match create_sink_at(stream, path, to) {
            Ok((sink, _)) => sink,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not seek");
                self.emit(TransportEvent::Error(e.to_string()));
                return;
            }
        };

        self.stop_outgoing();
        if let Some(old) = self.sink.take() {
            old.stop();
        }

        sink.set_volume(self.volume);
        self.clock = Clock::at(to);
        if !self.paused {
            sink.play();
            self.clock.resume();
        }
        self.sink = Some(sink);
        self.ended = false;
    }

    fn tick(&mut self) {
        let Some(sink) = self.sink.as_ref() else {
            return;
        };
        if self.paused || self.ended {
            return;
        }

        if sink.empty() {
            self.ended = true;
            self.paused = true;
            self.clock.pause();
            self.emit(TransportEvent::Ended);
            return;
        }
        self.emit(TransportEvent::TimeUpdate(self.clock.elapsed().as_secs_f64()));
    }

    fn quit(&mut self, fade_out_ms: u64) {
        self.stop_outgoing();
        if let Some(s) = self.sink.take() {
            if !self.paused {
                fade_out_sink(&s, self.volume, fade_out_ms);
            }
            s.stop();
        }
    }
}

/// Fade `old` out while `new` comes in, ending at `volume`.
///
/// Blocks for the crossfade duration; audio keeps flowing in rodio's
/// mixer thread meanwhile.
fn crossfade(old: &Sink, new: &Sink, volume: f32, settings: &AudioSettings) {
    let steps = settings.crossfade_steps.max(1);
    let step_ms = (settings.crossfade_ms / steps).max(1);

    new.set_volume(0.0);
    new.play();
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        old.set_volume(volume * (1.0 - t));
        new.set_volume(volume * t);
        thread::sleep(Duration::from_millis(step_ms));
    }
    old.stop();
    new.set_volume(volume);
}

fn fade_out_sink(sink: &Sink, volume: f32, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(volume * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}
