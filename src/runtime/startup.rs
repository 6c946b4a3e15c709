use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::app::App;
use crate::audio::RodioTransport;
use crate::catalog::LocalCatalog;
use crate::config::{self, RepeatSetting};
use crate::error::Result;
use crate::history::{HistoryConfig, HistoryRecorder, JsonHistoryFile, JsonPlayLog};
use crate::player::{ControllerBuilder, RepeatMode};
use crate::playlist::JsonPlaylistStore;
use crate::session::{SessionProvider, StaticSession};

use super::console::{Console, ConsoleNotifier};

pub fn repeat_mode(setting: RepeatSetting) -> RepeatMode {
    match setting {
        RepeatSetting::Off => RepeatMode::Off,
        RepeatSetting::All => RepeatMode::All,
        RepeatSetting::One => RepeatMode::One,
    }
}

/// Where history, the play log and playlists live.
pub fn data_dir(settings: &config::Settings) -> PathBuf {
    settings.data_dir().unwrap_or_else(|| {
        warn!("no data directory found (HOME unset?); using ./.encore");
        PathBuf::from(".encore")
    })
}

/// Wire the catalog, stores, session and audio thread into a console.
pub fn build_console(
    settings: &config::Settings,
    music_dir: &Path,
) -> Result<Console<RodioTransport>> {
    let session: Arc<dyn SessionProvider> =
        Arc::new(StaticSession::from_settings(&settings.session));
    let data = data_dir(settings);
    info!(dir = %data.display(), user = ?session.current_user(), "starting");

    let catalog = LocalCatalog::scan(music_dir, &settings.library);
    let playlists = JsonPlaylistStore::open_or_empty(data.join("playlists.json"));
    let app = App::new(Box::new(catalog), Box::new(playlists), session.clone())?;

    let history = HistoryRecorder::new(
        HistoryConfig::from_settings(&settings.history),
        Box::new(JsonHistoryFile::new(data.join("history.json"))),
        session,
    )
    .with_play_log(Arc::new(JsonPlayLog::new(data.join("plays.jsonl"))));

    let notices = ConsoleNotifier::default();
    let transport = RodioTransport::spawn(&settings.audio)?;
    let controller = ControllerBuilder::new(transport, history)
        .notifier(notices.clone())
        .volume(settings.playback.volume)
        .shuffle(settings.playback.shuffle)
        .repeat(repeat_mode(settings.playback.repeat))
        .build();

    Ok(Console::new(app, controller, notices, settings.clone()))
}
