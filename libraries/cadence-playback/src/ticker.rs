//! Cancellable periodic task
//!
//! A `Ticker` owns one spawned task that calls a closure once per period until
//! the closure breaks or the ticker is stopped. Stopping is immediate from the
//! caller's point of view and idempotent; dropping the handle stops it too.
//!
//! Every ticker carries a generation id. Owners keep the id of the ticker they
//! consider current and ignore callbacks from any other, which covers the window
//! between `abort()` and the runtime actually cancelling the task.

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::trace;

/// Handle to a running periodic task
#[derive(Debug)]
pub struct Ticker {
    generation: u64,
    task: JoinHandle<()>,
}

/// Decrements the live counter when the task's future is dropped,
/// whether it returned or was aborted
struct LiveGuard(Arc<AtomicUsize>);

impl LiveGuard {
    fn enter(counter: Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for LiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Ticker {
    /// Spawn a task on `runtime` that runs `on_tick` every `period`
    ///
    /// The first call happens one full period after the task starts.
    /// `live` counts tasks that are currently alive.
    pub fn spawn<F>(
        runtime: &Handle,
        generation: u64,
        period: Duration,
        live: Arc<AtomicUsize>,
        mut on_tick: F,
    ) -> Self
    where
        F: FnMut() -> ControlFlow<()> + Send + 'static,
    {
        let task = runtime.spawn(async move {
            let _guard = LiveGuard::enter(live);
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if on_tick().is_break() {
                    trace!("Ticker {} retired", generation);
                    break;
                }
            }
        });

        Self { generation, task }
    }

    /// Generation id assigned at spawn
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the task has completed or been cancelled
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Cancel the task
    pub fn stop(&self) {
        self.task.abort();
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.task.abort();
    }
}
