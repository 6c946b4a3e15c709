//! Application module: the browse model used by the console runtime.
//!
//! The `App` model lives in `app::model` and holds the catalog listing,
//! the active filter and the open playlist.

mod model;

pub use model::*;
