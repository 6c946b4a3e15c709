//! The play context used for next/previous.
//!
//! The queue keeps the caller's track list untouched and walks it through a
//! separate `order` of indices: the identity while shuffle is off, a random
//! permutation while it is on.

use rand::seq::SliceRandom;

use crate::catalog::Track;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

#[derive(Debug, Clone, Default)]
pub struct Queue {
    tracks: Vec<Track>,
    order: Vec<usize>,
}

impl Queue {
    pub fn new(tracks: Vec<Track>) -> Self {
        let order = (0..tracks.len()).collect();
        Self { tracks, order }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Tracks in the order next/previous walk them.
    pub fn in_play_order(&self) -> Vec<Track> {
        self.order.iter().map(|&i| self.tracks[i].clone()).collect()
    }

    /// Position of `id` in play order.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.order.iter().position(|&i| self.tracks[i].id == id)
    }

    /// The track adjacent to `id` in play order.
    ///
    /// `None` when `id` is not queued, or when it sits at the end being
    /// walked towards and `wrap` is off.
    pub fn neighbor(&self, id: &str, direction: Direction, wrap: bool) -> Option<&Track> {
        let pos = self.position_of(id)?;
        let len = self.order.len();

        let target = match direction {
            Direction::Next if pos + 1 < len => pos + 1,
            Direction::Next if wrap => 0,
            Direction::Previous if pos > 0 => pos - 1,
            Direction::Previous if wrap => len - 1,
            _ => return None,
        };
        Some(&self.tracks[self.order[target]])
    }

    /// Randomize play order. When `first` is queued it leads the new order,
    /// so the rest of the queue still lies ahead of the current track.
    pub fn shuffle_from(&mut self, first: Option<&str>) {
        self.order.shuffle(&mut rand::rng());

        if let Some(pos) = first.and_then(|id| self.position_of(id)) {
            let lead = self.order.remove(pos);
            self.order.insert(0, lead);
        }
    }

    /// Back to the order the tracks were supplied in.
    pub fn unshuffle(&mut self) {
        self.order = (0..self.tracks.len()).collect();
    }
}
