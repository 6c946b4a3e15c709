use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::error::Error;
use crate::history::{HistoryConfig, HistoryRecorder};
use crate::player::{ControllerBuilder, Transport, TransportEvent};
use crate::test_support::{MemoryHistory, anonymous, track};

use super::sink::resolve_media;
use super::transport::RodioTransport;
use super::types::{AudioCmd, AudioEvent, Clock};

#[test]
fn resolve_media_accepts_plain_paths_and_file_urls() {
    assert_eq!(
        resolve_media("/music/a.mp3").unwrap(),
        PathBuf::from("/music/a.mp3")
    );
    assert_eq!(
        resolve_media("file:///music/b song.flac").unwrap(),
        PathBuf::from("/music/b song.flac")
    );
    assert_eq!(
        resolve_media("  relative/c.ogg ").unwrap(),
        PathBuf::from("relative/c.ogg")
    );
}

#[test]
fn resolve_media_rejects_remote_and_empty_locators() {
    assert!(matches!(
        resolve_media("https://cdn.example.com/a.mp3"),
        Err(Error::Transport(_))
    ));
    assert!(matches!(resolve_media("   "), Err(Error::Transport(_))));
}

#[test]
fn clock_only_advances_while_running() {
    let mut clock = Clock::at(Duration::from_secs(30));
    assert_eq!(clock.elapsed(), Duration::from_secs(30));

    clock.resume();
    thread::sleep(Duration::from_millis(20));
    clock.pause();
    let paused_at = clock.elapsed();
    assert!(paused_at >= Duration::from_millis(30_020));

    thread::sleep(Duration::from_millis(20));
    assert_eq!(clock.elapsed(), paused_at);
}

#[test]
fn load_tags_commands_with_increasing_generations() {
    let (tx, rx) = mpsc::channel();
    let (_event_tx, events) = mpsc::channel::<AudioEvent>();
    let mut transport = RodioTransport::with_channels(tx, events, 0, None);

    transport.load("/music/a.mp3").unwrap();
    transport.load("file:///music/b.mp3").unwrap();

    let generations: Vec<u64> = rx
        .try_iter()
        .filter_map(|cmd| match cmd {
            AudioCmd::Load { generation, .. } => Some(generation),
            _ => None,
        })
        .collect();
    assert_eq!(generations, vec![1, 2]);
}

#[test]
fn refused_load_unloads_the_previous_media() {
    let (tx, rx) = mpsc::channel();
    let (event_tx, events) = mpsc::channel();
    let mut transport = RodioTransport::with_channels(tx, events, 0, None);

    transport.load("/music/a.mp3").unwrap();
    assert!(transport.load("http://radio.example/stream").is_err());

    let cmds: Vec<AudioCmd> = rx.try_iter().collect();
    assert_eq!(cmds.len(), 2);
    assert!(matches!(cmds[0], AudioCmd::Load { generation: 1, .. }));
    assert!(matches!(cmds[1], AudioCmd::Unload { generation: 2 }));

    event_tx
        .send(AudioEvent {
            generation: 1,
            event: TransportEvent::Ended,
        })
        .unwrap();
    assert!(transport.drain_events().is_empty());
}

#[test]
fn end_of_unplayable_track_does_not_advance_the_queue() {
    let (tx, rx) = mpsc::channel();
    let (event_tx, events) = mpsc::channel();
    let transport = RodioTransport::with_channels(tx, events, 0, None);
    let history = HistoryRecorder::new(
        HistoryConfig::default(),
        Box::new(MemoryHistory::default()),
        anonymous(),
    );
    let mut controller = ControllerBuilder::new(transport, history).build();

    let a = track("a");
    let mut b = track("b");
    b.media = "https://cdn.example.com/b.mp3".into();
    let c = track("c");
    controller.play(a.clone(), vec![a, b.clone(), c]);
    controller.play(b.clone(), vec![b, track("c")]);
    assert!(!controller.state().playing);

    // The first track's sink ran dry after the switch was requested.
    event_tx
        .send(AudioEvent {
            generation: 1,
            event: TransportEvent::Ended,
        })
        .unwrap();
    for event in controller.transport().drain_events() {
        controller.handle_event(event);
    }

    assert_eq!(controller.state().current_id(), Some("b"));
    let loads = rx
        .try_iter()
        .filter(|cmd| matches!(cmd, AudioCmd::Load { .. }))
        .count();
    assert_eq!(loads, 1);
}

#[test]
fn drain_events_drops_events_from_superseded_loads() {
    let (tx, _rx) = mpsc::channel();
    let (event_tx, events) = mpsc::channel();
    let mut transport = RodioTransport::with_channels(tx, events, 0, None);

    transport.load("/music/a.mp3").unwrap();
    transport.load("/music/b.mp3").unwrap();

    let stale = AudioEvent {
        generation: 1,
        event: TransportEvent::Ended,
    };
    let fresh = AudioEvent {
        generation: 2,
        event: TransportEvent::MetadataLoaded(12.5),
    };
    event_tx.send(stale).unwrap();
    event_tx.send(fresh).unwrap();

    assert_eq!(
        transport.drain_events(),
        vec![TransportEvent::MetadataLoaded(12.5)]
    );
    assert!(transport.drain_events().is_empty());
}

#[test]
fn commands_fail_once_the_audio_thread_is_gone() {
    let (tx, rx) = mpsc::channel();
    let (_event_tx, events) = mpsc::channel::<AudioEvent>();
    let mut transport = RodioTransport::with_channels(tx, events, 0, None);
    drop(rx);

    assert!(matches!(transport.play(), Err(Error::Transport(_))));
}

#[test]
fn set_position_rejects_non_finite_seconds() {
    let (tx, rx) = mpsc::channel();
    let (_event_tx, events) = mpsc::channel::<AudioEvent>();
    let mut transport = RodioTransport::with_channels(tx, events, 0, None);

    assert!(transport.set_position(f64::NAN).is_err());
    transport.set_position(-3.0).unwrap();
    match rx.try_recv().unwrap() {
        AudioCmd::Seek(to) => assert_eq!(to, Duration::ZERO),
        other => panic!("unexpected command {other:?}"),
    }
}
