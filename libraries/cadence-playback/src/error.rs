//! Error types for playback sessions

use thiserror::Error;

/// Playback errors
///
/// A rejected operation never changes session state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackError {
    /// Empty track list or start index outside it
    #[error("Invalid queue: start index {index} for {len} tracks")]
    InvalidQueue { len: usize, index: usize },

    /// No track is currently loaded
    #[error("No current track")]
    NoCurrentTrack,

    /// Seek fraction is not a number
    #[error("Invalid seek position: {0}")]
    InvalidSeekPosition(f64),

    /// Already at the last track
    #[error("Already at the end of the queue")]
    EndOfQueue,

    /// Already at the first track
    #[error("Already at the start of the queue")]
    StartOfQueue,

    /// Session was created outside a tokio runtime
    #[error("No tokio runtime available to drive the playback clock")]
    NoRuntime,
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
