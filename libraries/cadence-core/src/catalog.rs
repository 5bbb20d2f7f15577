//! Track catalog
//!
//! An ordered list of tracks with unique ids. The catalog stands in for the
//! remote library the client browses; applications use it to build the lists
//! handed to a playback session.

use crate::error::{CadenceError, Result};
use crate::types::{Track, TrackId};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Ordered, validated track list
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and tracks with a zero duration
    pub fn new(tracks: Vec<Track>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(tracks.len());
        for track in &tracks {
            if !seen.insert(&track.id) {
                return Err(CadenceError::Duplicate(format!("track id {}", track.id)));
            }
            if track.duration_secs == Some(0) {
                return Err(CadenceError::invalid_input(format!(
                    "track {} has a zero duration",
                    track.id
                )));
            }
        }

        Ok(Self { tracks })
    }

    /// Parse a catalog from a JSON array of tracks
    pub fn from_json(json: &str) -> Result<Self> {
        let tracks: Vec<Track> = serde_json::from_str(json)?;
        Self::new(tracks)
    }

    /// Load a catalog from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        debug!("Loaded {} tracks from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Look up a track by id
    pub fn get(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == *id)
    }

    /// Look up a track by id, failing if it is unknown
    pub fn require(&self, id: &TrackId) -> Result<&Track> {
        self.get(id.as_str())
            .ok_or_else(|| CadenceError::not_found("Track", id.as_str()))
    }

    /// All tracks in catalog order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the catalog has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Total known duration of the catalog in seconds
    ///
    /// Tracks without a duration do not contribute.
    pub fn total_duration_secs(&self) -> u64 {
        self.tracks
            .iter()
            .filter_map(|t| t.duration_secs)
            .map(u64::from)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"[
        {"id": "a", "title": "Alpha", "artist": "One", "year": 2001, "duration_secs": 120},
        {"id": "b", "title": "Bravo", "artist": "Two", "artwork": "b.png"},
        {"id": "c", "title": "Charlie", "artist": "Three", "duration_secs": 60}
    ]"#;

    #[test]
    fn parses_json_in_order() {
        let catalog = Catalog::from_json(SAMPLE).unwrap();
        let ids: Vec<_> = catalog.tracks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(catalog.get("b").unwrap().artwork.as_deref(), Some("b.png"));
        assert_eq!(catalog.total_duration_secs(), 180);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Catalog::new(vec![
            Track::new("a", "Alpha", "One"),
            Track::new("a", "Alpha again", "One"),
        ])
        .unwrap_err();
        assert!(matches!(err, CadenceError::Duplicate(_)));
    }

    #[test]
    fn rejects_zero_duration() {
        let err = Catalog::new(vec![Track::new("a", "Alpha", "One").with_duration_secs(0)])
            .unwrap_err();
        assert!(matches!(err, CadenceError::InvalidInput(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = Catalog::from_json("{not json").unwrap_err();
        assert!(matches!(err, CadenceError::Serialization(_)));
    }

    #[test]
    fn require_reports_missing_track() {
        let catalog = Catalog::from_json(SAMPLE).unwrap();
        assert!(catalog.require(&TrackId::new("c")).is_ok());

        let err = catalog.require(&TrackId::new("zzz")).unwrap_err();
        assert_eq!(err.to_string(), "Track not found: zzz");
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, CadenceError::Io(_)));
    }
}
