//! Playback Events
//!
//! Discrete notifications for observers that care about what changed rather
//! than the full snapshot. Events are emitted at key points:
//! - Queue replacement (`play`, `play_from_list`)
//! - Track changes (load, next, previous)
//! - Phase changes (play/pause/seek)
//! - Position updates (every tick and every seek)
//! - End of track

use crate::types::SessionPhase;
use cadence_core::TrackId;
use serde::{Deserialize, Serialize};

/// Events emitted by a playback session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlaybackEvent {
    /// A new queue was loaded
    QueueReplaced {
        /// Number of tracks in the new queue
        length: usize,
        /// Index playback starts from
        start_index: usize,
    },

    /// The current track changed
    TrackChanged {
        /// ID of the new (current) track
        track_id: TrackId,
        /// ID of the previous track (if any)
        previous_track_id: Option<TrackId>,
    },

    /// Session phase changed (playing, paused, seeking)
    PhaseChanged {
        /// The new phase
        phase: SessionPhase,
    },

    /// Position changed by a tick or a seek
    PositionUpdate {
        /// Elapsed position in seconds
        elapsed_secs: u32,
        /// Track length in seconds
        duration_secs: u32,
    },

    /// Track reached its end and playback stopped
    TrackFinished {
        /// ID of the finished track
        track_id: TrackId,
    },
}

impl PlaybackEvent {
    /// Short name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::QueueReplaced { .. } => "queue_replaced",
            Self::TrackChanged { .. } => "track_changed",
            Self::PhaseChanged { .. } => "phase_changed",
            Self::PositionUpdate { .. } => "position_update",
            Self::TrackFinished { .. } => "track_finished",
        }
    }
}
