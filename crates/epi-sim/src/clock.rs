//! `SimulationClock` — timer-driven stepping on Tokio.
//!
//! # Model
//!
//! ```text
//!            ┌──────────── Mutex<Sim> ────────────┐
//! ticker ──► │ step()  → snapshot ─► watch::Sender │ ──► subscribers
//! configure ►│ setter  → snapshot ─►               │
//!            └─────────────────────────────────────┘
//! ```
//!
//! One background task owns the timer.  A step and a configuration write
//! both take the same lock, so a setter never observes or races a
//! half-computed tick, and two steps never overlap.  When a step outlasts
//! the interval the missed ticks are skipped, not queued.
//!
//! Readers never lock: they see the last committed [`Snapshot`] through a
//! `watch` channel.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::{Mutex, Notify, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use epi_core::{RandomSource, SimRng};

use crate::{Sim, Snapshot};

/// Shortest accepted tick interval.
pub const MIN_INTERVAL_MS: u64 = 1;

pub(crate) struct Shared<R: RandomSource> {
    pub(crate) sim: Mutex<Sim<R>>,
    interval_ms: AtomicU64,
    retimed:     Notify,
    snapshots:   watch::Sender<Arc<Snapshot>>,
}

impl<R: RandomSource> Shared<R> {
    fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.load(Ordering::Acquire))
    }

    /// Step once and publish.  Returns the snapshot and whether a bounded
    /// run has ended.
    async fn advance(&self) -> (Arc<Snapshot>, bool) {
        let mut sim = self.sim.lock().await;
        sim.step();
        let snapshot = Arc::new(sim.snapshot());
        let finished = sim.is_finished();
        drop(sim);

        self.snapshots.send_replace(Arc::clone(&snapshot));
        (snapshot, finished)
    }
}

struct Runner {
    stop:   Arc<Notify>,
    handle: JoinHandle<()>,
}

/// Drives a [`Sim`] at a fixed, adjustable cadence.
///
/// `start` and `stop` need a Tokio runtime; everything else works without
/// the ticker running, so tests can call [`step_now`](Self::step_now)
/// instead of waiting on a timer.
pub struct SimulationClock<R: RandomSource = SimRng> {
    pub(crate) shared: Arc<Shared<R>>,
    runner: Option<Runner>,
}

impl<R: RandomSource + Send + 'static> SimulationClock<R> {
    /// Wrap `sim`; the initial interval comes from `sim.config`.
    pub fn new(sim: Sim<R>) -> Self {
        let interval_ms = sim.config.tick_interval_ms.max(MIN_INTERVAL_MS);
        let (snapshots, _) = watch::channel(Arc::new(sim.snapshot()));
        Self {
            shared: Arc::new(Shared {
                sim: Mutex::new(sim),
                interval_ms: AtomicU64::new(interval_ms),
                retimed: Notify::new(),
                snapshots,
            }),
            runner: None,
        }
    }

    // ── Timer ─────────────────────────────────────────────────────────────

    /// Begin stepping every `interval_ms`.  A no-op returning `false` when
    /// already running.
    ///
    /// # Panics
    ///
    /// Outside a Tokio runtime.
    pub fn start(&mut self, interval_ms: u64) -> bool {
        if self.is_running() {
            debug!("clock already running");
            return false;
        }
        self.set_interval(interval_ms);

        let stop = Arc::new(Notify::new());
        let handle = tokio::spawn(tick_loop(Arc::clone(&self.shared), Arc::clone(&stop)));
        self.runner = Some(Runner { stop, handle });
        info!(interval_ms = self.interval_ms(), "clock started");
        true
    }

    /// Halt stepping.  A tick in progress completes first.  Returns `false`
    /// if the clock was not running.
    pub async fn stop(&mut self) -> bool {
        let Some(runner) = self.runner.take() else {
            return false;
        };
        runner.stop.notify_one();
        if let Err(e) = runner.handle.await {
            warn!(error = %e, "clock task ended abnormally");
        }
        info!(tick = %self.latest().tick, "clock stopped");
        true
    }

    /// `false` before `start`, after `stop`, and once a bounded run ends.
    pub fn is_running(&self) -> bool {
        self.runner.as_ref().is_some_and(|r| !r.handle.is_finished())
    }

    /// Change the cadence; the next tick is due one new interval from now.
    /// Values below [`MIN_INTERVAL_MS`] are raised to it.  Returns the
    /// previous interval.
    pub fn set_interval(&self, interval_ms: u64) -> u64 {
        let interval_ms = interval_ms.max(MIN_INTERVAL_MS);
        let prev = self.shared.interval_ms.swap(interval_ms, Ordering::AcqRel);
        if prev != interval_ms {
            self.shared.retimed.notify_one();
            debug!(from = prev, to = interval_ms, "tick interval changed");
        }
        prev
    }

    pub fn interval_ms(&self) -> u64 {
        self.shared.interval_ms.load(Ordering::Acquire)
    }

    // ── Between-tick access ───────────────────────────────────────────────

    /// Run `f` against the simulation while no tick is in progress, then
    /// publish the resulting state.
    pub async fn configure<T>(&self, f: impl FnOnce(&mut Sim<R>) -> T) -> T {
        let mut sim = self.shared.sim.lock().await;
        let out = f(&mut sim);
        let snapshot = Arc::new(sim.snapshot());
        drop(sim);
        self.shared.snapshots.send_replace(snapshot);
        out
    }

    /// Select the starting region by key.  Rejected once one is chosen.
    pub async fn set_starting_region(&self, key: &str) -> bool {
        self.configure(|sim| sim.set_starting_region(key)).await
    }

    /// Step once immediately, independent of the timer.
    pub async fn step_now(&self) -> Arc<Snapshot> {
        self.shared.advance().await.0
    }

    // ── Snapshots ─────────────────────────────────────────────────────────

    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.shared.snapshots.subscribe()
    }

    /// The most recently committed snapshot.
    pub fn latest(&self) -> Arc<Snapshot> {
        Arc::clone(&self.shared.snapshots.borrow())
    }
}

impl<R: RandomSource> Drop for SimulationClock<R> {
    fn drop(&mut self) {
        if let Some(runner) = self.runner.take() {
            runner.stop.notify_one();
        }
    }
}

fn ticker(period: Duration) -> Interval {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

async fn tick_loop<R: RandomSource>(shared: Arc<Shared<R>>, stop: Arc<Notify>) {
    let mut interval = ticker(shared.interval());

    loop {
        tokio::select! {
            biased;
            () = stop.notified() => break,
            () = shared.retimed.notified() => {
                interval = ticker(shared.interval());
                continue;
            }
            _ = interval.tick() => {}
        }

        let (snapshot, finished) = shared.advance().await;
        if finished {
            info!(tick = %snapshot.tick, "bounded run complete");
            break;
        }
    }
}
