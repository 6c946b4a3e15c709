//! Text rendering for the console front-end.
//!
//! Everything here turns model values into strings; printing is left to
//! the runtime.

use crate::catalog::{Category, Track};
use crate::config::{ControlsSettings, TimeField, TrackDisplayField, UiSettings};
use crate::player::{Notice, NoticeLevel, PlaybackState, format_time};
use crate::playlist::Playlist;

/// Render the command help, incorporating the configured scrub and volume steps.
pub fn help_text(controls: &ControlsSettings) -> String {
    let step = (controls.volume_step * 100.0).round();
    let rows: Vec<(&str, String)> = vec![
        ("list", "show the (filtered) catalog".into()),
        ("search <text>", "filter by title, artist or group".into()),
        ("category <song|bgm|all>", "filter by category".into()),
        ("lang <tag|all>", "filter by language".into()),
        ("clear", "drop every filter".into()),
        ("play <n>", "play track n of the listing".into()),
        ("pause, p", "play/pause".into()),
        ("next, n / prev", "next/previous track".into()),
        ("seek <secs>", "jump to a position".into()),
        (
            "fwd / back",
            format!("scrub +/-{}s", controls.scrub_seconds),
        ),
        ("vol <0-1>", "set the volume".into()),
        ("up / down", format!("volume +/-{step}%")),
        ("mute", "mute/unmute".into()),
        ("shuffle", "toggle shuffle".into()),
        ("repeat", "cycle repeat off/all/one".into()),
        ("status", "show what is playing".into()),
        ("queue", "show the play queue".into()),
        ("recent", "recently played tracks".into()),
        ("delete <n>", "remove track n from the catalog (admin)".into()),
        ("playlists", "list your playlists".into()),
        ("playlist new <name>", "create a playlist".into()),
        ("playlist open <n> / close", "open or close a playlist".into()),
        ("playlist add <n>", "add track n of the listing".into()),
        ("playlist remove <n>", "remove track n of the open playlist".into()),
        ("playlist play", "play the open playlist".into()),
        ("playlist delete <n>", "delete a playlist".into()),
        ("config", "print the effective configuration".into()),
        ("help", "this text".into()),
        ("quit, q", "leave".into()),
    ];

    let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(k, v)| format!("  {k:<width$}  {v}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the "now playing" track text according to `ui` settings.
pub fn now_playing_track_text(track: &Track, ui: &UiSettings) -> String {
    let mut parts: Vec<String> = Vec::new();

    for f in &ui.now_playing_track_fields {
        let part = match f {
            TrackDisplayField::Display => Some(track.display()),
            TrackDisplayField::Title => Some(track.title.clone()),
            TrackDisplayField::Artist => Some(track.artist.clone()),
            TrackDisplayField::Group => track.group.clone(),
            TrackDisplayField::Category => Some(track.category.to_string()),
            TrackDisplayField::Language => Some(track.language.clone()),
        };
        if let Some(p) = part.filter(|p| !p.trim().is_empty()) {
            parts.push(p);
        }
    }

    if parts.is_empty() {
        track.display()
    } else {
        parts.join(&ui.now_playing_track_separator)
    }
}

/// Build the now-playing time text (elapsed/total/remaining) per `UiSettings`.
pub fn now_playing_time_text(
    position: f64,
    duration: Option<f64>,
    ui: &UiSettings,
) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();
    for f in &ui.now_playing_time_fields {
        match f {
            TimeField::Elapsed => parts.push(format_time(Some(position))),
            TimeField::Total => {
                if duration.is_some() {
                    parts.push(format_time(duration));
                }
            }
            TimeField::Remaining => {
                if let Some(total) = duration {
                    let rem = (total - position).max(0.0);
                    parts.push(format!("-{}", format_time(Some(rem))));
                }
            }
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(&ui.now_playing_time_separator))
    }
}

pub fn status_line(state: &PlaybackState, ui: &UiSettings) -> String {
    let mut line = match state.current.as_ref() {
        None => "Nothing playing".to_string(),
        Some(track) => {
            let marker = if state.playing { "playing" } else { "paused" };
            let mut s = format!("[{marker}] {}", now_playing_track_text(track, ui));
            if let Some(time) = now_playing_time_text(state.position, state.duration, ui) {
                s.push_str("  ");
                s.push_str(&time);
            }
            s
        }
    };

    if state.muted {
        line.push_str("  vol muted");
    } else {
        line.push_str(&format!("  vol {:.0}%", state.volume * 100.0));
    }
    if state.shuffle {
        line.push_str("  shuffle");
    }
    line.push_str(&format!("  repeat {}", state.repeat.label()));
    line
}

fn track_row(n: usize, track: &Track, current: Option<&str>) -> String {
    let marker = if current == Some(track.id.as_str()) { '>' } else { ' ' };
    let mut row = format!("{marker}{n:>3}. {}", track.display());
    if let Some(group) = track.group.as_deref() {
        row.push_str(&format!(" ({group})"));
    }
    if track.category == Category::Bgm {
        row.push_str(" [bgm]");
    }
    row.push_str(&format!(" <{}>", track.language));
    row
}

/// Numbered listing, marking the current track with `>`.
pub fn track_listing(tracks: &[Track], current: Option<&str>, empty: &str) -> String {
    if tracks.is_empty() {
        return empty.to_string();
    }
    tracks
        .iter()
        .enumerate()
        .map(|(i, t)| track_row(i + 1, t, current))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn playlist_listing(playlists: &[Playlist], open: Option<&str>) -> String {
    if playlists.is_empty() {
        return "No playlists yet.".to_string();
    }
    playlists
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let marker = if open == Some(p.id.as_str()) { '>' } else { ' ' };
            let count = p.track_ids.len();
            let noun = if count == 1 { "track" } else { "tracks" };
            format!("{marker}{:>3}. {} ({count} {noun})", i + 1, p.name)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn notice_text(notice: &Notice) -> String {
    match notice.level {
        NoticeLevel::Info => format!(":: {}", notice.message),
        NoticeLevel::Error => format!("!! {}", notice.message),
    }
}
