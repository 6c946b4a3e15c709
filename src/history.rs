//! Recently played tracks.
//!
//! Two tiers are kept side by side: a capped, deduplicated list that is
//! saved locally on every play, and, for signed-in users, a durable play log
//! that records each play event and is deduplicated when read back.

mod play_log;
mod recent;
mod recorder;
mod store;
mod writer;

pub use play_log::{JsonPlayLog, PlayEvent, PlayLog};
pub use recent::{HistoryConfig, RecentTracks};
pub use recorder::HistoryRecorder;
pub use store::{JsonHistoryFile, LocalHistoryStore};
pub use writer::PlayLogWriter;
