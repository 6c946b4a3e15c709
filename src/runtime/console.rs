use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::app::{App, PlayRequest};
use crate::config::Settings;
use crate::player::{Controller, Notice, Notifier, Transport};
use crate::ui;

use super::command::{Command, ParseError};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Holds notices until the console writes them out; clones share the queue.
#[derive(Debug, Default, Clone)]
pub struct ConsoleNotifier {
    pending: Arc<Mutex<Vec<Notice>>>,
}

impl ConsoleNotifier {
    fn take(&self) -> Vec<Notice> {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *pending)
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        self.pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notice);
    }
}

/// Executes console commands against the browse model and the controller.
pub struct Console<T: Transport> {
    pub app: App,
    pub controller: Controller<T>,
    notices: ConsoleNotifier,
    settings: Settings,
}

impl<T: Transport> Console<T> {
    /// `notices` must be the notifier `controller` reports through.
    pub fn new(
        app: App,
        controller: Controller<T>,
        notices: ConsoleNotifier,
        settings: Settings,
    ) -> Self {
        Self {
            app,
            controller,
            notices,
            settings,
        }
    }

    /// Write notices raised since the last flush.
    pub fn flush_notices(&self, out: &mut impl Write) -> io::Result<()> {
        for notice in self.notices.take() {
            writeln!(out, "{}", ui::notice_text(&notice))?;
        }
        Ok(())
    }

    /// Parse and run one input line. Blank lines do nothing; bad input
    /// gets a usage hint.
    pub fn handle_line(&mut self, line: &str, out: &mut impl Write) -> io::Result<Flow> {
        match Command::parse(line) {
            Ok(cmd) => self.execute(cmd, out),
            Err(ParseError::Empty) => Ok(Flow::Continue),
            Err(e) => {
                writeln!(out, "{e}")?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Run `cmd`, writing its output and any notices it raised to `out`.
    ///
    /// Failures of the requested action are reported on `out`; only a
    /// broken output stream is returned as an error.
    pub fn execute(&mut self, cmd: Command, out: &mut impl Write) -> io::Result<Flow> {
        debug!(?cmd, "command");
        let flow = match self.dispatch(cmd, out) {
            Ok(flow) => flow,
            Err(Outcome::Io(e)) => return Err(e),
            Err(Outcome::Failed(e)) => {
                writeln!(out, "!! {e}")?;
                Flow::Continue
            }
        };
        self.flush_notices(out)?;
        Ok(flow)
    }

    fn dispatch(&mut self, cmd: Command, out: &mut impl Write) -> std::result::Result<Flow, Outcome> {
        match cmd {
            Command::List => self.print_listing(out)?,
            Command::Search(query) => {
                self.app.set_query(&query);
                self.print_listing(out)?;
            }
            Command::Category(category) => {
                self.app.set_category(category);
                self.print_listing(out)?;
            }
            Command::Lang(language) => {
                let known = self.app.languages();
                if let Some(l) = language.as_deref().filter(|l| !known.iter().any(|k| k == l)) {
                    writeln!(out, "No tracks tagged {l}; known: {}", known.join(", "))?;
                }
                self.app.set_language(language);
                self.print_listing(out)?;
            }
            Command::Clear => {
                self.app.clear_filter();
                self.print_listing(out)?;
            }
            Command::Play(n) => {
                let request = self.app.play_visible(n)?;
                self.play(request);
            }
            Command::PlayPause => {
                if self.controller.state().current.is_none() {
                    writeln!(out, "Nothing loaded; use `play <n>` first.")?;
                } else {
                    self.controller.toggle_play_pause();
                    self.print_status(out)?;
                }
            }
            Command::Next => {
                if !self.controller.next() {
                    writeln!(out, "No next track.")?;
                }
            }
            Command::Prev => {
                if !self.controller.previous() {
                    writeln!(out, "No previous track.")?;
                }
            }
            Command::Seek(seconds) => self.seek_to(seconds, out)?,
            Command::Forward => {
                let to = self.controller.state().position + self.scrub();
                self.seek_to(to, out)?;
            }
            Command::Back => {
                let to = self.controller.state().position - self.scrub();
                self.seek_to(to, out)?;
            }
            Command::Volume(level) => self.volume_to(level, out)?,
            Command::VolumeUp => {
                let level = self.controller.state().volume + self.settings.controls.volume_step;
                self.volume_to(level, out)?;
            }
            Command::VolumeDown => {
                let level = self.controller.state().volume - self.settings.controls.volume_step;
                self.volume_to(level, out)?;
            }
            Command::Mute => {
                self.controller.toggle_mute();
                let word = if self.controller.state().muted { "Muted" } else { "Unmuted" };
                writeln!(out, "{word}.")?;
            }
            Command::Shuffle => {
                self.controller.toggle_shuffle();
                let word = if self.controller.state().shuffle { "on" } else { "off" };
                writeln!(out, "Shuffle {word}.")?;
            }
            Command::Repeat => {
                self.controller.toggle_repeat();
                writeln!(out, "Repeat {}.", self.controller.state().repeat.label())?;
            }
            Command::Status => self.print_status(out)?,
            Command::Queue => {
                let snapshot = self.controller.snapshot();
                let listing = ui::track_listing(
                    &snapshot.queue,
                    snapshot.state.current_id(),
                    "Queue is empty.",
                );
                writeln!(out, "{listing}")?;
            }
            Command::Recent => {
                let app = &self.app;
                let recent = self.controller.recent(|id| app.find(id));
                writeln!(out, "{}", ui::track_listing(&recent, None, "Nothing played yet."))?;
            }
            Command::Delete(n) => {
                let track = self.app.delete_visible(n)?;
                writeln!(out, "Deleted {}.", track.display())?;
            }
            Command::Playlists => self.print_playlists(out)?,
            Command::PlaylistNew(name) => {
                self.app.create_playlist(&name)?;
                writeln!(out, "Created playlist {}.", name.trim())?;
                self.print_playlists(out)?;
            }
            Command::PlaylistOpen(n) => {
                let name = self.app.open_playlist(n)?.name.clone();
                writeln!(out, "Playlist {name}:")?;
                self.print_playlist_tracks(out)?;
            }
            Command::PlaylistClose => {
                self.app.close_playlist();
                writeln!(out, "Playlist closed.")?;
            }
            Command::PlaylistAdd(n) => {
                let track = self.app.add_to_playlist(n)?;
                writeln!(out, "Added {}.", track.display())?;
                self.print_playlist_tracks(out)?;
            }
            Command::PlaylistRemove(n) => {
                let track = self.app.remove_from_playlist(n)?;
                writeln!(out, "Removed {}.", track.display())?;
                self.print_playlist_tracks(out)?;
            }
            Command::PlaylistPlay => {
                let request = self.app.play_playlist()?;
                self.play(request);
            }
            Command::PlaylistDelete(n) => {
                let playlist = self.app.delete_playlist(n)?;
                writeln!(out, "Deleted playlist {}.", playlist.name)?;
            }
            Command::Config => match toml::to_string(&self.settings) {
                Ok(text) => write!(out, "{text}")?,
                Err(e) => writeln!(out, "!! could not render config: {e}")?,
            },
            Command::Help => writeln!(out, "{}", ui::help_text(&self.settings.controls))?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn play(&mut self, (track, queue): PlayRequest) {
        self.controller.play(track, queue);
    }

    fn scrub(&self) -> f64 {
        self.settings.controls.scrub_seconds as f64
    }

    fn seek_to(&mut self, seconds: f64, out: &mut impl Write) -> io::Result<()> {
        if self.controller.state().current.is_none() {
            return writeln!(out, "Nothing loaded.");
        }
        self.controller.seek(seconds);
        self.print_status(out)
    }

    fn volume_to(&mut self, level: f32, out: &mut impl Write) -> io::Result<()> {
        self.controller.set_volume(level);
        writeln!(out, "Volume {:.0}%.", self.controller.state().volume * 100.0)
    }

    fn print_status(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{}", ui::status_line(self.controller.state(), &self.settings.ui))
    }

    fn print_listing(&self, out: &mut impl Write) -> io::Result<()> {
        let tracks = self.app.visible_tracks();
        let current = self.controller.state().current_id();
        writeln!(out, "{}", ui::track_listing(&tracks, current, "No tracks match."))
    }

    fn print_playlists(&self, out: &mut impl Write) -> std::result::Result<(), Outcome> {
        let playlists = self.app.playlists()?;
        let open = self.app.current_playlist().map(|p| p.id.as_str());
        writeln!(out, "{}", ui::playlist_listing(&playlists, open))?;
        Ok(())
    }

    fn print_playlist_tracks(&self, out: &mut impl Write) -> io::Result<()> {
        let tracks = self.app.playlist_tracks();
        let current = self.controller.state().current_id();
        writeln!(out, "{}", ui::track_listing(&tracks, current, "Playlist is empty."))
    }
}

/// Why a command stopped early.
enum Outcome {
    Io(io::Error),
    Failed(crate::error::Error),
}

impl From<io::Error> for Outcome {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<crate::error::Error> for Outcome {
    fn from(e: crate::error::Error) -> Self {
        Self::Failed(e)
    }
}
