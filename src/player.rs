//! Playback & queue controller.
//!
//! The controller is the only thing that mutates playback state and the
//! queue. It drives a single `Transport` and reacts to the events the
//! transport reports back.

mod controller;
mod notify;
mod queue;
mod state;
mod time;
mod transport;

pub use controller::{Controller, ControllerBuilder, Snapshot};
pub use notify::{LogNotifier, Notice, NoticeLevel, Notifier};
pub use queue::{Direction, Queue};
pub use state::{PlaybackState, RepeatMode};
pub use time::format_time;
pub use transport::{Transport, TransportEvent};
