//! Opening media and preparing `rodio` sinks.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use crate::error::{Error, Result};

/// Turn a media locator into a local path.
///
/// Plain paths and `file://` URLs are accepted. Other schemes are refused:
/// this transport only plays local files.
pub(super) fn resolve_media(media: &str) -> Result<PathBuf> {
    let media = media.trim();
    if media.is_empty() {
        return Err(Error::Transport("empty media locator".into()));
    }

    if let Some(path) = media.strip_prefix("file://") {
        return Ok(PathBuf::from(path));
    }
    if let Some((scheme, _)) = media.split_once("://") {
        return Err(Error::Transport(format!(
            "unsupported media scheme {scheme:?}"
        )));
    }
    Ok(PathBuf::from(media))
}

/// Create a paused `Sink` for `path` that starts playback at `start_at`.
///
/// Also returns the total duration of the media when the decoder knows it.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    path: &Path,
    start_at: Duration,
) -> Result<(Sink, Option<Duration>)> {
    let file = File::open(path)
        .map_err(|e| Error::Transport(format!("cannot open {}: {e}", path.display())))?;

    let decoder = Decoder::new(BufReader::new(file))
        .map_err(|e| Error::Transport(format!("cannot decode {}: {e}", path.display())))?;
    let total = decoder.total_duration();

    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    let source = decoder.skip_duration(start_at);

    let sink = Sink::connect_new(stream.mixer());
    sink.pause();
    sink.append(source);
    Ok((sink, total))
}
