//! Track catalog: the track model, filtering and a local directory-backed
//! catalog.
//!
//! The controller treats tracks as read-only values handed out by a
//! `Catalog`; everything here is about producing and narrowing those lists.

mod filter;
mod model;
mod scan;
mod store;

pub use filter::{TrackFilter, distinct_languages};
pub use model::{Category, Track, TrackId};
pub use scan::scan;
pub use store::{Catalog, LocalCatalog};

#[cfg(test)]
mod tests;
