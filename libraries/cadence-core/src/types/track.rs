/// Track types
use super::TrackId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Catalog track
///
/// Immutable once constructed. Tracks come from the external catalog and are
/// only ever read by the playback session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Display year
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,

    /// Artwork reference (URL or asset path)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork: Option<String>,

    /// Track duration in whole seconds, when the catalog knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<u32>,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(id: impl Into<TrackId>, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            year: None,
            artwork: None,
            duration_secs: None,
        }
    }

    /// Set the display year
    #[must_use]
    pub fn with_year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }

    /// Set the artwork reference
    #[must_use]
    pub fn with_artwork(mut self, artwork: impl Into<String>) -> Self {
        self.artwork = Some(artwork.into());
        self
    }

    /// Set the duration in seconds
    #[must_use]
    pub fn with_duration_secs(mut self, secs: u32) -> Self {
        self.duration_secs = Some(secs);
        self
    }

    /// Get the track duration as a Duration
    pub fn duration(&self) -> Option<Duration> {
        self.duration_secs.map(|secs| Duration::from_secs(u64::from(secs)))
    }

    /// "Artist - Title" label used in logs and listings
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.artist, self.title)
    }
}
