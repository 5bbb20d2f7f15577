//! Cadence - Playback Sessions
//!
//! Platform-agnostic playback session state for Cadence.
//!
//! This crate provides:
//! - An immutable playback queue with seed resolution ("play this track,
//!   keep the surrounding list")
//! - A playback state snapshot (current track, play flag, elapsed, duration)
//! - A session controller with play, pause/resume, seek, next and previous
//! - A virtual clock advancing elapsed time once per second while playing
//! - Observable state (`watch`) and transition events (`broadcast`)
//!
//! # Architecture
//!
//! `cadence-playback` never touches audio:
//! - No decoding, no output device
//! - No UI or navigation
//! - No persistence
//!
//! The media framework that actually renders audio subscribes to the session
//! and follows its state.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use cadence_core::Track;
//! use cadence_playback::{PlaybackConfig, PlaybackSession, SessionPhase};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> cadence_playback::Result<()> {
//! let session = PlaybackSession::new(PlaybackConfig::default())?;
//!
//! let album = vec![
//!     Track::new("1", "Opening", "Artist").with_duration_secs(200),
//!     Track::new("2", "Middle", "Artist").with_duration_secs(240),
//! ];
//! session.play_from_list(album, 0)?;
//! assert_eq!(session.phase(), SessionPhase::Playing);
//!
//! session.toggle();
//! assert_eq!(session.phase(), SessionPhase::Paused);
//!
//! // Skipping always resumes playback
//! session.next()?;
//! assert_eq!(session.phase(), SessionPhase::Playing);
//! assert_eq!(session.snapshot().total_duration_secs(), 240);
//! # Ok(())
//! # }
//! ```
//!
//! # Example: Observing State
//!
//! ```rust,no_run
//! use cadence_playback::{PlaybackConfig, PlaybackSession};
//!
//! # async fn observe() -> cadence_playback::Result<()> {
//! let session = PlaybackSession::new(PlaybackConfig::default())?;
//! let mut states = session.subscribe();
//!
//! while states.changed().await.is_ok() {
//!     let state = states.borrow_and_update().clone();
//!     println!("{}s / {}s", state.elapsed_secs(), state.total_duration_secs());
//! }
//! # Ok(())
//! # }
//! ```

mod error;
pub mod events;
mod queue;
mod session;
mod state;
pub mod ticker;
pub mod types;

// Public exports
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use queue::Queue;
pub use session::PlaybackSession;
pub use state::PlaybackState;
pub use ticker::Ticker;
pub use types::{PlaybackConfig, SessionPhase};
