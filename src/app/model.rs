//! Browse model: the `App` struct.
//!
//! `App` holds the cached catalog listing, the active filter and the
//! playlist that is open, and turns 1-based listing numbers typed by the
//! user into tracks and queues for the controller.

use std::sync::Arc;

use tracing::info;

use crate::catalog::{Catalog, Category, Track, TrackFilter, distinct_languages};
use crate::error::{Error, Result};
use crate::playlist::{Playlist, PlaylistId, PlaylistStore};
use crate::session::{SessionProvider, UserId};

/// What to hand to `Controller::play`: the chosen track and its queue.
pub type PlayRequest = (Track, Vec<Track>);

/// The main application model.
pub struct App {
    catalog: Box<dyn Catalog>,
    playlists: Box<dyn PlaylistStore>,
    session: Arc<dyn SessionProvider>,

    tracks: Vec<Track>,
    filter: TrackFilter,
    open_playlist: Option<Playlist>,
}

impl App {
    pub fn new(
        catalog: Box<dyn Catalog>,
        playlists: Box<dyn PlaylistStore>,
        session: Arc<dyn SessionProvider>,
    ) -> Result<Self> {
        let tracks = catalog.list()?;
        Ok(Self {
            catalog,
            playlists,
            session,
            tracks,
            filter: TrackFilter::default(),
            open_playlist: None,
        })
    }

    /// Re-read the catalog listing.
    pub fn refresh(&mut self) -> Result<()> {
        self.tracks = self.catalog.list()?;
        Ok(())
    }

    /// Every catalog track, newest first.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn filter(&self) -> &TrackFilter {
        &self.filter
    }

    pub fn set_query(&mut self, query: &str) {
        self.filter.query = query.trim().to_string();
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.filter.category = category;
    }

    pub fn set_language(&mut self, language: Option<String>) {
        self.filter.language = language
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());
    }

    pub fn clear_filter(&mut self) {
        self.filter = TrackFilter::default();
    }

    /// Language tags present in the catalog, for filter choices.
    pub fn languages(&self) -> Vec<String> {
        distinct_languages(&self.tracks)
    }

    /// The filtered catalog listing that `play`, `add` and `delete` number into.
    pub fn visible_tracks(&self) -> Vec<Track> {
        self.filter.apply(&self.tracks)
    }

    /// Catalog lookup used to resolve history ids.
    pub fn find(&self, id: &str) -> Option<Track> {
        self.tracks.iter().find(|t| t.id == id).cloned()
    }

    /// Track number `n` (1-based) of the visible listing.
    pub fn visible_track(&self, n: usize) -> Result<Track> {
        nth(self.visible_tracks(), n, "track")
    }

    /// Play track `n` of the visible listing with that listing as the queue.
    pub fn play_visible(&self, n: usize) -> Result<PlayRequest> {
        let queue = self.visible_tracks();
        let track = nth(queue.clone(), n, "track")?;
        Ok((track, queue))
    }

    /// Remove track `n` of the visible listing from the catalog.
    pub fn delete_visible(&mut self, n: usize) -> Result<Track> {
        if !self.session.is_admin() {
            return Err(Error::PermissionDenied(
                "only administrators can delete tracks".into(),
            ));
        }

        let track = self.visible_track(n)?;
        self.catalog.delete(&track.id)?;
        self.tracks.retain(|t| t.id != track.id);
        info!(id = %track.id, "track deleted");
        Ok(track)
    }

    fn user(&self) -> Result<UserId> {
        self.session
            .current_user()
            .ok_or_else(|| Error::PermissionDenied("sign in to use playlists".into()))
    }

    /// The signed-in user's playlists, newest first.
    pub fn playlists(&self) -> Result<Vec<Playlist>> {
        let user = self.user()?;
        self.playlists.list_by_owner(&user)
    }

    pub fn create_playlist(&mut self, name: &str) -> Result<PlaylistId> {
        let user = self.user()?;
        self.playlists.create(&user, name)
    }

    /// Open playlist number `n` of `playlists()`.
    pub fn open_playlist(&mut self, n: usize) -> Result<&Playlist> {
        let playlist = nth(self.playlists()?, n, "playlist")?;
        Ok(self.open_playlist.insert(playlist))
    }

    pub fn close_playlist(&mut self) {
        self.open_playlist = None;
    }

    pub fn current_playlist(&self) -> Option<&Playlist> {
        self.open_playlist.as_ref()
    }

    /// Tracks of the open playlist in playlist order; unknown ids are skipped.
    pub fn playlist_tracks(&self) -> Vec<Track> {
        self.open_playlist
            .as_ref()
            .map(|p| p.resolve(&self.tracks))
            .unwrap_or_default()
    }

    fn opened(&self) -> Result<Playlist> {
        self.open_playlist
            .clone()
            .ok_or_else(|| Error::InvalidInput("no playlist is open".into()))
    }

    /// Append track `n` of the visible listing to the open playlist.
    /// Adding a track that is already there changes nothing.
    pub fn add_to_playlist(&mut self, n: usize) -> Result<Track> {
        self.user()?;
        let playlist = self.opened()?;
        let track = self.visible_track(n)?;
        self.store_tracks(&playlist.id, playlist.with_track(&track.id))?;
        Ok(track)
    }

    /// Remove track `n` of `playlist_tracks()` from the open playlist.
    pub fn remove_from_playlist(&mut self, n: usize) -> Result<Track> {
        self.user()?;
        let playlist = self.opened()?;
        let track = nth(self.playlist_tracks(), n, "playlist track")?;
        self.store_tracks(&playlist.id, playlist.without_track(&track.id))?;
        Ok(track)
    }

    fn store_tracks(&mut self, id: &str, track_ids: Vec<String>) -> Result<()> {
        self.playlists.update(id, track_ids.clone())?;
        if let Some(open) = self.open_playlist.as_mut().filter(|p| p.id == id) {
            open.track_ids = track_ids;
        }
        Ok(())
    }

    /// Play the open playlist from its first track.
    pub fn play_playlist(&self) -> Result<PlayRequest> {
        let playlist = self.opened()?;
        let queue = playlist.resolve(&self.tracks);
        let first = queue
            .first()
            .cloned()
            .ok_or_else(|| Error::InvalidInput(format!("playlist {} is empty", playlist.name)))?;
        Ok((first, queue))
    }

    /// Delete playlist number `n` of `playlists()`, closing it if open.
    pub fn delete_playlist(&mut self, n: usize) -> Result<Playlist> {
        let playlist = nth(self.playlists()?, n, "playlist")?;
        self.playlists.delete(&playlist.id)?;
        if self.open_playlist.as_ref().is_some_and(|p| p.id == playlist.id) {
            self.open_playlist = None;
        }
        Ok(playlist)
    }
}

fn nth<T>(items: Vec<T>, n: usize, what: &str) -> Result<T> {
    let len = items.len();
    n.checked_sub(1)
        .and_then(|i| items.into_iter().nth(i))
        .ok_or_else(|| Error::InvalidInput(format!("no {what} number {n} (1-{len})")))
}
