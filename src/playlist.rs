//! User playlists: named, ordered lists of track ids.

mod model;
mod store;

pub use model::{Playlist, PlaylistId};
pub use store::{JsonPlaylistStore, PlaylistStore};
