use crate::catalog::Track;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum RepeatMode {
    /// Stop at either end of the queue.
    #[default]
    Off,
    /// Wrap around at either end of the queue.
    All,
    /// Replay the current track when it ends.
    One,
}

impl RepeatMode {
    /// `Off -> All -> One -> Off`.
    pub fn cycle(self) -> Self {
        match self {
            Self::Off => Self::All,
            Self::All => Self::One,
            Self::One => Self::Off,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::All => "all",
            Self::One => "one",
        }
    }
}

/// Everything the transport is doing, as far as the controller knows.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub current: Option<Track>,
    pub playing: bool,
    /// Elapsed seconds in the current track.
    pub position: f64,
    /// Total seconds; `None` until the transport reports metadata.
    pub duration: Option<f64>,
    /// Stored volume, 0.0 to 1.0. Muting leaves it untouched.
    pub volume: f32,
    pub muted: bool,
    pub shuffle: bool,
    pub repeat: RepeatMode,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current: None,
            playing: false,
            position: 0.0,
            duration: None,
            volume: 1.0,
            muted: false,
            shuffle: false,
            repeat: RepeatMode::Off,
        }
    }
}

impl PlaybackState {
    /// What the listener actually hears.
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current.as_ref().map(|t| t.id.as_str())
    }
}
