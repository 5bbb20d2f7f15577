//! Core types for playback sessions

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Coarse session phase, derived from `PlaybackState`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No queue loaded
    Empty,

    /// Track loaded, clock stopped
    Paused,

    /// Track loaded, clock running
    Playing,

    /// Seek gesture in progress (clock suspended until `end_seek`)
    Seeking,
}

/// Configuration for a playback session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Clock period in milliseconds; one tick adds one second of elapsed time (default: 1000)
    pub tick_interval_ms: u64,

    /// Duration used for tracks the catalog has no length for (default: 180)
    pub default_track_duration_secs: u32,

    /// Buffered events per subscriber before the oldest are dropped (default: 64)
    pub event_capacity: usize,
}

impl PlaybackConfig {
    /// Tick period as a Duration
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            default_track_duration_secs: 180,
            event_capacity: 64,
        }
    }
}
