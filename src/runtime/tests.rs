use std::sync::Arc;

use super::console::{Console, ConsoleNotifier, Flow};
use super::startup::repeat_mode;
use crate::app::App;
use crate::catalog::{Category, LocalCatalog};
use crate::config::{RepeatSetting, Settings};
use crate::history::{HistoryConfig, HistoryRecorder};
use crate::player::{ControllerBuilder, RepeatMode, TransportEvent};
use crate::playlist::JsonPlaylistStore;
use crate::session::SessionProvider;
use crate::test_support::{FakeTransport, MemoryHistory, anonymous, signed_in, track_at};

fn console(session: Arc<dyn SessionProvider>) -> (tempfile::TempDir, Console<FakeTransport>) {
    console_with(session, FakeTransport::default())
}

fn console_with(
    session: Arc<dyn SessionProvider>,
    transport: FakeTransport,
) -> (tempfile::TempDir, Console<FakeTransport>) {
    let dir = tempfile::tempdir().unwrap();
    let mut bgm = track_at("rain", 0);
    bgm.category = Category::Bgm;
    let catalog = LocalCatalog::from_tracks(vec![track_at("a", 2), track_at("b", 1), bgm]);
    let playlists = JsonPlaylistStore::open(dir.path().join("playlists.json")).unwrap();
    let app = App::new(Box::new(catalog), Box::new(playlists), session.clone()).unwrap();

    let history = HistoryRecorder::new(
        HistoryConfig::default(),
        Box::new(MemoryHistory::default()),
        session,
    );
    let notices = ConsoleNotifier::default();
    let controller = ControllerBuilder::new(transport, history)
        .notifier(notices.clone())
        .build();
    (dir, Console::new(app, controller, notices, Settings::default()))
}

fn run(console: &mut Console<FakeTransport>, line: &str) -> (Flow, String) {
    let mut out = Vec::new();
    let flow = console.handle_line(line, &mut out).unwrap();
    (flow, String::from_utf8(out).unwrap())
}

#[test]
fn play_then_status_reports_the_track() {
    let (_dir, mut c) = console(anonymous());
    run(&mut c, "play 2");

    assert_eq!(c.controller.state().current_id(), Some("b"));
    let (_, status) = run(&mut c, "status");
    assert!(status.starts_with("[playing] Artist b - Title b"), "{status}");
}

#[test]
fn filtered_listing_becomes_the_queue() {
    let (_dir, mut c) = console(anonymous());
    let (_, listing) = run(&mut c, "category song");
    assert_eq!(listing.lines().count(), 2);

    run(&mut c, "play 1");
    assert_eq!(c.controller.queue().len(), 2);
    run(&mut c, "next");
    assert_eq!(c.controller.state().current_id(), Some("b"));

    let (_, out) = run(&mut c, "next");
    assert_eq!(out.trim(), "No next track.");
}

#[test]
fn unknown_language_lists_the_known_ones() {
    let (_dir, mut c) = console(anonymous());
    let (_, out) = run(&mut c, "lang fr");
    assert!(out.starts_with("No tracks tagged fr; known: en"), "{out}");
    assert!(out.contains("No tracks match."));
}

#[test]
fn scrub_and_volume_use_configured_steps() {
    let (_dir, mut c) = console(anonymous());
    run(&mut c, "play 1");

    run(&mut c, "seek 20");
    run(&mut c, "fwd");
    assert_eq!(c.controller.state().position, 25.0);
    run(&mut c, "back");
    run(&mut c, "back");
    assert_eq!(c.controller.state().position, 15.0);

    run(&mut c, "vol 0.5");
    run(&mut c, "down");
    assert!((c.controller.state().volume - 0.4).abs() < 1e-6);
    let (_, out) = run(&mut c, "mute");
    assert_eq!(out.trim(), "Muted.");
    run(&mut c, "up");
    assert!(!c.controller.state().muted);
}

#[test]
fn toggles_report_their_new_state() {
    let (_dir, mut c) = console(anonymous());
    assert_eq!(run(&mut c, "shuffle").1.trim(), "Shuffle on.");
    assert_eq!(run(&mut c, "repeat").1.trim(), "Repeat all.");
    assert_eq!(run(&mut c, "repeat").1.trim(), "Repeat one.");
}

#[test]
fn pause_without_a_track_explains_itself() {
    let (_dir, mut c) = console(anonymous());
    let (_, out) = run(&mut c, "p");
    assert!(out.contains("play <n>"));
    assert!(!c.controller.state().playing);
}

#[test]
fn recent_lists_played_tracks_newest_first() {
    let (_dir, mut c) = console(anonymous());
    run(&mut c, "play 1");
    run(&mut c, "play 3");

    let (_, out) = run(&mut c, "recent");
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("Title rain"));
    assert!(lines[1].contains("Title a"));
}

#[test]
fn playback_notices_follow_the_command_output() {
    let transport = FakeTransport {
        refuse_media: Some("/music/b.mp3".into()),
        ..FakeTransport::default()
    };
    let (_dir, mut c) = console_with(anonymous(), transport);

    let (_, out) = run(&mut c, "play 1");
    assert_eq!(out.trim(), ":: Now playing: Title a");

    let (_, out) = run(&mut c, "next");
    assert!(out.starts_with("!! Could not play Title b"), "{out}");

    let (_, out) = run(&mut c, "status");
    assert!(!out.contains("!!"), "{out}");
}

#[test]
fn notices_raised_between_commands_wait_for_a_flush() {
    let (_dir, mut c) = console(anonymous());
    run(&mut c, "play 1");
    c.controller.handle_event(TransportEvent::Ended);

    let mut out = Vec::new();
    c.flush_notices(&mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap().trim(), ":: Now playing: Title b");

    let mut out = Vec::new();
    c.flush_notices(&mut out).unwrap();
    assert!(out.is_empty());
}

#[test]
fn failures_are_printed_not_returned() {
    let (_dir, mut c) = console(anonymous());

    let (flow, out) = run(&mut c, "play 9");
    assert_eq!(flow, Flow::Continue);
    assert!(out.starts_with("!! Invalid input"), "{out}");

    let (_, out) = run(&mut c, "delete 1");
    assert!(out.starts_with("!! Permission denied"), "{out}");

    let (_, out) = run(&mut c, "playlists");
    assert!(out.starts_with("!! Permission denied"), "{out}");
}

#[test]
fn unknown_and_blank_input() {
    let (_dir, mut c) = console(anonymous());
    let (_, out) = run(&mut c, "dance");
    assert!(out.contains("help"));
    let (flow, out) = run(&mut c, "   ");
    assert_eq!(flow, Flow::Continue);
    assert!(out.is_empty());
}

#[test]
fn playlist_commands_round_trip() {
    let (_dir, mut c) = console(signed_in("alice"));
    run(&mut c, "playlist new Evening");
    run(&mut c, "playlist open 1");
    run(&mut c, "playlist add 2");
    let (_, out) = run(&mut c, "playlist add 1");
    assert!(out.contains("Title b") && out.contains("Title a"));

    run(&mut c, "playlist play");
    assert_eq!(c.controller.state().current_id(), Some("b"));
    assert_eq!(c.controller.queue().len(), 2);

    let (_, out) = run(&mut c, "playlists");
    assert!(out.contains("Evening (2 tracks)"), "{out}");

    run(&mut c, "playlist delete 1");
    let (_, out) = run(&mut c, "playlists");
    assert_eq!(out.trim(), "No playlists yet.");
}

#[test]
fn config_prints_effective_settings_as_toml() {
    let (_dir, mut c) = console(anonymous());
    let (_, out) = run(&mut c, "config");
    assert!(out.contains("[audio]"));
    assert!(out.contains("scrub_seconds = 5"));
}

#[test]
fn quit_ends_the_session() {
    let (_dir, mut c) = console(anonymous());
    assert_eq!(run(&mut c, "quit").0, Flow::Quit);
    assert_eq!(run(&mut c, "q").0, Flow::Quit);
}

#[test]
fn repeat_setting_maps_to_mode() {
    assert_eq!(repeat_mode(RepeatSetting::Off), RepeatMode::Off);
    assert_eq!(repeat_mode(RepeatSetting::All), RepeatMode::All);
    assert_eq!(repeat_mode(RepeatSetting::One), RepeatMode::One);
}
