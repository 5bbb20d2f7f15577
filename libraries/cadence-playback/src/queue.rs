//! Playback queue
//!
//! "What plays, in what order". A queue is built once from a caller-supplied
//! list and never edited afterwards; loading new music replaces it wholesale.
//! The track storage is shared, so cloning a queue (e.g. into every state
//! snapshot) is cheap.

use crate::error::{PlaybackError, Result};
use cadence_core::{Track, TrackId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Immutable ordered track list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Queue {
    tracks: Arc<[Track]>,
}

impl Queue {
    /// Empty queue
    pub fn new() -> Self {
        Self {
            tracks: Vec::<Track>::new().into(),
        }
    }

    /// Build a queue from `tracks`, starting at `start_index`
    ///
    /// Fails if `tracks` is empty or `start_index` is outside it.
    pub fn from_list(tracks: Vec<Track>, start_index: usize) -> Result<(Self, usize)> {
        if start_index >= tracks.len() {
            return Err(PlaybackError::InvalidQueue {
                len: tracks.len(),
                index: start_index,
            });
        }

        Ok((
            Self {
                tracks: tracks.into(),
            },
            start_index,
        ))
    }

    /// Build a queue that plays `track` while keeping the surrounding context
    ///
    /// ```text
    /// seed B, hint [A, B, C]  ->  [A, B, C], start 1
    /// seed D, hint [A, B, C]  ->  [D, A, B, C], start 0
    /// ```
    ///
    /// Identity is by track id and the first match wins. The seed is always
    /// playable, even when the hint omits it.
    pub fn from_seed(track: Track, hint: Vec<Track>) -> (Self, usize) {
        if let Some(position) = hint.iter().position(|t| t.id == track.id) {
            return (
                Self {
                    tracks: hint.into(),
                },
                position,
            );
        }

        let mut tracks = Vec::with_capacity(hint.len() + 1);
        let seed_id = track.id.clone();
        tracks.push(track);
        tracks.extend(hint.into_iter().filter(|t| t.id != seed_id));

        (
            Self {
                tracks: tracks.into(),
            },
            0,
        )
    }

    /// Track at index
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Position of the first track with `id`
    pub fn position_of(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == *id)
    }

    /// Iterate tracks in play order
    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    /// Tracks in play order
    pub fn as_slice(&self) -> &[Track] {
        &self.tracks
    }

    /// Track ids in play order
    pub fn ids(&self) -> Vec<&TrackId> {
        self.tracks.iter().map(|t| &t.id).collect()
    }

    /// Total number of tracks in queue
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl Default for Queue {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a Queue {
    type Item = &'a Track;
    type IntoIter = std::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
