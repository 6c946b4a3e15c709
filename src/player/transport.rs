use crate::error::Result;

/// The audio primitive the controller drives: one media locator at a time.
///
/// Calls return once the request is handed over; loading and decoding
/// happen asynchronously and their outcome arrives as `TransportEvent`s.
pub trait Transport {
    /// Replace whatever is loaded with `media`. Starts paused.
    fn load(&mut self, media: &str) -> Result<()>;
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
    fn set_position(&mut self, seconds: f64) -> Result<()>;
    /// Audible level, 0.0 to 1.0.
    fn set_volume(&mut self, level: f32) -> Result<()>;
}

/// What the transport reports about the loaded media.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    /// Playback position in seconds.
    TimeUpdate(f64),
    /// Total duration in seconds, known once the media header is read.
    MetadataLoaded(f64),
    /// The media played to its end.
    Ended,
    /// Loading or decoding failed.
    Error(String),
}
