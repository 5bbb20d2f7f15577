//! Playback state
//!
//! The value the session publishes to observers. Transitions here are pure:
//! they never touch the clock, so the session decides when the ticker runs and
//! these functions only decide what the numbers become.

use crate::error::{PlaybackError, Result};
use crate::queue::Queue;
use cadence_core::Track;
use serde::{Deserialize, Serialize};

/// Outcome of one clock tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickOutcome {
    /// Nothing playing, nothing changed
    Idle,
    /// Elapsed advanced by one second
    Advanced,
    /// Elapsed reached the track duration and playback stopped
    Finished,
}

/// Direction for `step`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Next,
    Previous,
}

/// Snapshot of a playback session
///
/// `current_index` is `None` exactly when the queue is empty, and
/// `elapsed_secs` never exceeds `total_duration_secs`, which is always positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackState {
    queue: Queue,
    current_index: Option<usize>,
    is_playing: bool,
    elapsed_secs: u32,
    total_duration_secs: u32,
}

impl PlaybackState {
    /// State of a session that has not loaded anything yet
    pub fn empty(default_duration_secs: u32) -> Self {
        Self {
            queue: Queue::new(),
            current_index: None,
            is_playing: false,
            elapsed_secs: 0,
            total_duration_secs: default_duration_secs.max(1),
        }
    }

    /// The loaded queue
    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    /// Index of the current track
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// The current track
    pub fn current_track(&self) -> Option<&Track> {
        self.current_index.and_then(|i| self.queue.get(i))
    }

    /// Whether the clock is running
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Elapsed position in whole seconds
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    /// Length of the current track in whole seconds
    pub fn total_duration_secs(&self) -> u32 {
        self.total_duration_secs
    }

    /// Position as a fraction of the track length, in `[0, 1]`
    pub fn progress(&self) -> f64 {
        f64::from(self.elapsed_secs) / f64::from(self.total_duration_secs)
    }

    /// Whether a track follows the current one
    pub fn has_next(&self) -> bool {
        self.current_index
            .is_some_and(|i| i + 1 < self.queue.len())
    }

    /// Whether a track precedes the current one
    pub fn has_previous(&self) -> bool {
        self.current_index.is_some_and(|i| i > 0)
    }

    /// Verify the structural invariants, describing the first violation found
    pub fn check_invariants(&self) -> std::result::Result<(), String> {
        match self.current_index {
            None if !self.queue.is_empty() => {
                return Err(format!("no current index for {} queued tracks", self.queue.len()));
            }
            Some(i) if i >= self.queue.len() => {
                return Err(format!("index {} outside queue of {}", i, self.queue.len()));
            }
            _ => {}
        }

        if self.total_duration_secs == 0 {
            return Err("total duration is zero".to_string());
        }

        if self.elapsed_secs > self.total_duration_secs {
            return Err(format!(
                "elapsed {}s exceeds duration {}s",
                self.elapsed_secs, self.total_duration_secs
            ));
        }

        Ok(())
    }

    // ===== Transitions =====

    /// Replace everything with a freshly loaded queue, playing from the start
    pub(crate) fn load(&mut self, queue: Queue, index: usize, default_duration_secs: u32) {
        self.queue = queue;
        self.current_index = Some(index);
        self.is_playing = true;
        self.elapsed_secs = 0;
        self.total_duration_secs = self.duration_of_current(default_duration_secs);
    }

    /// Flip the play flag, returning the new value
    pub(crate) fn toggle(&mut self) -> bool {
        self.is_playing = !self.is_playing;
        self.is_playing
    }

    /// Set the play flag
    pub(crate) fn set_playing(&mut self, playing: bool) {
        self.is_playing = playing;
    }

    /// Move the position to `percent` of the track (clamped to `[0, 1]`)
    ///
    /// Returns the new elapsed position. Never changes the play flag.
    pub(crate) fn seek_to(&mut self, percent: f64) -> Result<u32> {
        if percent.is_nan() {
            return Err(PlaybackError::InvalidSeekPosition(percent));
        }
        if self.current_index.is_none() {
            return Err(PlaybackError::NoCurrentTrack);
        }

        let fraction = percent.clamp(0.0, 1.0);
        let target = (fraction * f64::from(self.total_duration_secs)).round() as u32;
        self.elapsed_secs = target.min(self.total_duration_secs);
        Ok(self.elapsed_secs)
    }

    /// Move to the neighbouring track, restarting it and forcing playback on
    pub(crate) fn step(&mut self, step: Step, default_duration_secs: u32) -> Result<()> {
        let current = self.current_index.ok_or(PlaybackError::NoCurrentTrack)?;

        let target = match step {
            Step::Next if current + 1 < self.queue.len() => current + 1,
            Step::Next => return Err(PlaybackError::EndOfQueue),
            Step::Previous if current > 0 => current - 1,
            Step::Previous => return Err(PlaybackError::StartOfQueue),
        };

        self.current_index = Some(target);
        self.elapsed_secs = 0;
        self.is_playing = true;
        self.total_duration_secs = self.duration_of_current(default_duration_secs);
        Ok(())
    }

    /// Advance the virtual clock by one second
    ///
    /// Playback stops at the end of the track; there is no auto-advance.
    pub(crate) fn tick(&mut self) -> TickOutcome {
        if !self.is_playing || self.current_index.is_none() {
            return TickOutcome::Idle;
        }

        self.elapsed_secs = self
            .elapsed_secs
            .saturating_add(1)
            .min(self.total_duration_secs);

        if self.elapsed_secs >= self.total_duration_secs {
            self.is_playing = false;
            TickOutcome::Finished
        } else {
            TickOutcome::Advanced
        }
    }

    fn duration_of_current(&self, default_duration_secs: u32) -> u32 {
        self.current_track()
            .and_then(|t| t.duration_secs)
            .filter(|secs| *secs > 0)
            .unwrap_or(default_duration_secs)
            .max(1)
    }
}
