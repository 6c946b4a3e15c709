use std::path::{Path, PathBuf};

use crate::catalog::Track;
use crate::error::Result;
use crate::persist::{read_json_or_default, write_json_atomic};

/// Persistence for the local recent list.
pub trait LocalHistoryStore: Send {
    fn load(&self) -> Result<Vec<Track>>;
    fn save(&self, tracks: &[Track]) -> Result<()>;
}

/// Recent list stored as a JSON array of tracks.
#[derive(Debug, Clone)]
pub struct JsonHistoryFile {
    path: PathBuf,
}

impl JsonHistoryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LocalHistoryStore for JsonHistoryFile {
    fn load(&self) -> Result<Vec<Track>> {
        read_json_or_default(&self.path)
    }

    fn save(&self, tracks: &[Track]) -> Result<()> {
        write_json_atomic(&self.path, tracks)
    }
}
