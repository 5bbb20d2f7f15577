//! Playback session - core orchestration
//!
//! Owns one `PlaybackState`, keeps the ticker in step with `is_playing`, and
//! publishes every transition. Caller operations and clock ticks serialize on a
//! single mutex; the lock is never held across an `.await`.

use crate::{
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    queue::Queue,
    state::{PlaybackState, Step, TickOutcome},
    ticker::Ticker,
    types::{PlaybackConfig, SessionPhase},
};
use cadence_core::{Track, TrackId};
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, trace};

/// A single playback session
///
/// Callers hold the session (or an `Arc` of it) and pass it explicitly to
/// whatever needs to drive playback. Dropping the session stops its clock.
///
/// # Example
///
/// ```rust
/// use cadence_core::Track;
/// use cadence_playback::{PlaybackConfig, PlaybackSession};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> cadence_playback::Result<()> {
/// let session = PlaybackSession::new(PlaybackConfig::default())?;
///
/// let tracks = vec![
///     Track::new("a", "Intro", "Band"),
///     Track::new("b", "Single", "Band"),
/// ];
/// session.play(tracks[1].clone(), tracks)?;
///
/// let state = session.snapshot();
/// assert_eq!(state.current_index(), Some(1));
/// assert!(state.is_playing());
///
/// session.begin_seek();
/// session.seek_to(0.5)?;
/// session.end_seek();
/// assert_eq!(session.snapshot().elapsed_secs(), 90);
/// # Ok(())
/// # }
/// ```
pub struct PlaybackSession {
    core: Arc<SessionCore>,
}

/// State shared between the session handle and its ticker task
struct SessionCore {
    inner: Mutex<Inner>,
    snapshots: watch::Sender<PlaybackState>,
    events: broadcast::Sender<PlaybackEvent>,
    runtime: Handle,
    tick_interval: Duration,
    default_duration_secs: u32,
    live_tickers: Arc<AtomicUsize>,
}

/// Everything guarded by the session lock
struct Inner {
    state: PlaybackState,

    // Clock; present exactly while `state.is_playing()`
    ticker: Option<Ticker>,
    next_generation: u64,

    // Seek gesture bracket
    seeking: bool,
    resume_after_seek: bool,
}

impl PlaybackSession {
    /// Create a session driven by the current tokio runtime
    ///
    /// Fails with `PlaybackError::NoRuntime` outside a runtime context.
    pub fn new(config: PlaybackConfig) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|_| PlaybackError::NoRuntime)?;
        Ok(Self::with_runtime(config, runtime))
    }

    /// Create a session whose clock runs on `runtime`
    ///
    /// Operations may then be called from any thread.
    pub fn with_runtime(config: PlaybackConfig, runtime: Handle) -> Self {
        let default_duration_secs = config.default_track_duration_secs.max(1);
        let state = PlaybackState::empty(default_duration_secs);
        let (snapshots, _) = watch::channel(state.clone());
        let (events, _) = broadcast::channel(config.event_capacity.max(1));

        Self {
            core: Arc::new(SessionCore {
                inner: Mutex::new(Inner {
                    state,
                    ticker: None,
                    next_generation: 0,
                    seeking: false,
                    resume_after_seek: false,
                }),
                snapshots,
                events,
                runtime,
                tick_interval: config.tick_interval().max(Duration::from_millis(1)),
                default_duration_secs,
                live_tickers: Arc::new(AtomicUsize::new(0)),
            }),
        }
    }

    // ===== Playback Control =====

    /// Replace the queue with `tracks` and start playing `start_index` from zero
    ///
    /// Invalid input is rejected without touching the current state.
    pub fn play_from_list(&self, tracks: Vec<Track>, start_index: usize) -> Result<()> {
        let (queue, index) = Queue::from_list(tracks, start_index)?;
        self.load(queue, index);
        Ok(())
    }

    /// Play `track`, keeping `hint` as the surrounding queue
    ///
    /// See [`Queue::from_seed`] for how the queue is resolved.
    pub fn play(&self, track: Track, hint: Vec<Track>) -> Result<()> {
        let (queue, index) = Queue::from_seed(track, hint);
        self.load(queue, index);
        Ok(())
    }

    /// Flip between playing and paused, returning whether the session now plays
    ///
    /// On an empty session only the flag flips; the clock finds nothing to
    /// advance.
    pub fn toggle(&self) -> bool {
        let mut inner = self.core.lock();
        let playing = inner.state.toggle();

        if playing {
            self.core.restart_ticker(&mut inner);
        } else {
            inner.stop_ticker();
        }

        debug!(
            "Toggle -> {} at {}s",
            if playing { "playing" } else { "paused" },
            inner.state.elapsed_secs()
        );
        self.core.emit(PlaybackEvent::PhaseChanged {
            phase: inner.phase(),
        });
        self.core.publish(&inner);
        playing
    }

    /// Start a seek gesture: remember whether we were playing, then pause
    ///
    /// Calling it twice records the (by then paused) state the second time.
    pub fn begin_seek(&self) {
        let mut inner = self.core.lock();
        inner.resume_after_seek = inner.state.is_playing();
        inner.seeking = true;
        inner.state.set_playing(false);
        inner.stop_ticker();

        debug!("Seek started (resume afterwards: {})", inner.resume_after_seek);
        self.core.emit(PlaybackEvent::PhaseChanged {
            phase: inner.phase(),
        });
        self.core.publish(&inner);
    }

    /// Move the position to `percent` of the current track
    ///
    /// `percent` is clamped to `[0, 1]`. Never resumes playback.
    pub fn seek_to(&self, percent: f64) -> Result<()> {
        let mut inner = self.core.lock();
        let elapsed = inner.state.seek_to(percent)?;

        debug!("Seek to {:.3} -> {}s", percent, elapsed);
        self.core.emit(PlaybackEvent::PositionUpdate {
            elapsed_secs: elapsed,
            duration_secs: inner.state.total_duration_secs(),
        });
        self.core.publish(&inner);
        Ok(())
    }

    /// Finish a seek gesture, resuming if playback was active when it began
    ///
    /// Without a preceding `begin_seek` this does nothing.
    pub fn end_seek(&self) {
        let mut inner = self.core.lock();
        let resume = std::mem::take(&mut inner.resume_after_seek);
        let was_seeking = std::mem::take(&mut inner.seeking);

        if resume {
            inner.state.set_playing(true);
            self.core.restart_ticker(&mut inner);
        }

        debug!("Seek ended (resumed: {})", resume);
        if resume || was_seeking {
            self.core.emit(PlaybackEvent::PhaseChanged {
                phase: inner.phase(),
            });
        }
        self.core.publish(&inner);
    }

    /// Skip to the next track and play it from the start
    ///
    /// Resumes playback even if the session was paused.
    pub fn next(&self) -> Result<()> {
        self.step(Step::Next)
    }

    /// Go back to the previous track and play it from the start
    ///
    /// Resumes playback even if the session was paused.
    pub fn prev(&self) -> Result<()> {
        self.step(Step::Previous)
    }

    /// Stop the clock and pause
    ///
    /// Called automatically on drop. The queue and position are kept.
    pub fn shutdown(&self) {
        let mut inner = self.core.lock();
        let was_playing = inner.state.is_playing();
        inner.state.set_playing(false);
        inner.seeking = false;
        inner.resume_after_seek = false;
        inner.stop_ticker();

        if was_playing {
            info!("Playback session shut down");
            self.core.emit(PlaybackEvent::PhaseChanged {
                phase: inner.phase(),
            });
            self.core.publish(&inner);
        }
    }

    // ===== State Queries =====

    /// Copy of the current state
    pub fn snapshot(&self) -> PlaybackState {
        self.core.lock().state.clone()
    }

    /// Watch every published state
    ///
    /// The receiver starts out holding the current state.
    pub fn subscribe(&self) -> watch::Receiver<PlaybackState> {
        self.core.snapshots.subscribe()
    }

    /// Receive discrete transition events from now on
    pub fn events(&self) -> broadcast::Receiver<PlaybackEvent> {
        self.core.events.subscribe()
    }

    /// Current session phase
    pub fn phase(&self) -> SessionPhase {
        self.core.lock().phase()
    }

    /// The current track
    pub fn current_track(&self) -> Option<Track> {
        self.core.lock().state.current_track().cloned()
    }

    /// Whether the session currently owns a running clock
    pub fn is_ticking(&self) -> bool {
        self.core.lock().ticker.is_some()
    }

    /// Number of clock tasks alive for this session
    ///
    /// Cancelled tasks are counted until the runtime has dropped them.
    pub fn live_tickers(&self) -> usize {
        self.core.live_tickers.load(Ordering::SeqCst)
    }

    // ===== Internals =====

    fn load(&self, queue: Queue, index: usize) {
        let mut inner = self.core.lock();
        let previous = inner.state.current_track().map(|t| t.id.clone());
        let length = queue.len();

        inner
            .state
            .load(queue, index, self.core.default_duration_secs);
        inner.seeking = false;
        inner.resume_after_seek = false;
        self.core.restart_ticker(&mut inner);

        info!("Loaded queue of {} tracks, starting at {}", length, index);
        self.core.emit(PlaybackEvent::QueueReplaced {
            length,
            start_index: index,
        });
        self.core.emit_track_changed(&inner, previous);
        self.core.emit(PlaybackEvent::PhaseChanged {
            phase: inner.phase(),
        });
        self.core.publish(&inner);
    }

    fn step(&self, step: Step) -> Result<()> {
        let mut inner = self.core.lock();
        let previous = inner.state.current_track().map(|t| t.id.clone());

        inner.state.step(step, self.core.default_duration_secs)?;
        inner.seeking = false;
        inner.resume_after_seek = false;
        self.core.restart_ticker(&mut inner);

        debug!("{:?} -> index {:?}", step, inner.state.current_index());
        self.core.emit_track_changed(&inner, previous);
        self.core.emit(PlaybackEvent::PhaseChanged {
            phase: inner.phase(),
        });
        self.core.publish(&inner);
        Ok(())
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for PlaybackSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackSession")
            .field("state", &self.snapshot())
            .field("live_tickers", &self.live_tickers())
            .finish()
    }
}

impl SessionCore {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace any running clock with a fresh one
    fn restart_ticker(self: &Arc<Self>, inner: &mut Inner) {
        inner.stop_ticker();

        inner.next_generation += 1;
        let generation = inner.next_generation;
        let core = Arc::downgrade(self);

        inner.ticker = Some(Ticker::spawn(
            &self.runtime,
            generation,
            self.tick_interval,
            Arc::clone(&self.live_tickers),
            move || Self::on_tick(&core, generation),
        ));
        trace!("Ticker {} started", generation);
    }

    fn on_tick(core: &Weak<Self>, generation: u64) -> ControlFlow<()> {
        match core.upgrade() {
            Some(core) => core.tick(generation),
            None => ControlFlow::Break(()),
        }
    }

    fn tick(&self, generation: u64) -> ControlFlow<()> {
        let mut inner = self.lock();

        // A replaced clock can still wake once before its abort lands
        if inner.ticker.as_ref().map(Ticker::generation) != Some(generation) {
            return ControlFlow::Break(());
        }

        match inner.state.tick() {
            TickOutcome::Idle => ControlFlow::Continue(()),
            TickOutcome::Advanced => {
                trace!("Tick -> {}s", inner.state.elapsed_secs());
                self.emit_position(&inner);
                self.publish(&inner);
                ControlFlow::Continue(())
            }
            TickOutcome::Finished => {
                inner.ticker = None;

                if let Some(track) = inner.state.current_track() {
                    info!("Finished {}", track.display_name());
                    self.emit(PlaybackEvent::TrackFinished {
                        track_id: track.id.clone(),
                    });
                }
                self.emit_position(&inner);
                self.emit(PlaybackEvent::PhaseChanged {
                    phase: inner.phase(),
                });
                self.publish(&inner);
                ControlFlow::Break(())
            }
        }
    }

    fn publish(&self, inner: &Inner) {
        self.snapshots.send_replace(inner.state.clone());
    }

    fn emit(&self, event: PlaybackEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    fn emit_position(&self, inner: &Inner) {
        self.emit(PlaybackEvent::PositionUpdate {
            elapsed_secs: inner.state.elapsed_secs(),
            duration_secs: inner.state.total_duration_secs(),
        });
    }

    fn emit_track_changed(&self, inner: &Inner, previous: Option<TrackId>) {
        if let Some(track) = inner.state.current_track() {
            self.emit(PlaybackEvent::TrackChanged {
                track_id: track.id.clone(),
                previous_track_id: previous,
            });
        }
    }
}

impl Inner {
    fn stop_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.stop();
            trace!("Ticker {} stopped", ticker.generation());
        }
    }

    fn phase(&self) -> SessionPhase {
        if self.state.current_index().is_none() {
            SessionPhase::Empty
        } else if self.seeking && !self.state.is_playing() {
            SessionPhase::Seeking
        } else if self.state.is_playing() {
            SessionPhase::Playing
        } else {
            SessionPhase::Paused
        }
    }
}
