//! Simulation observer trait for progress reporting and data collection.

use epi_core::Tick;
use epi_region::Totals;

use crate::Snapshot;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] and
/// [`Sim::run_ticks`][crate::Sim::run_ticks].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { every: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, totals: &Totals) {
///         if tick.0 % self.every == 0 {
///             println!("{tick}: {} infected, {} dead", totals.infected, totals.dead);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before a tick is computed.  `tick` is the state being read.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after a tick is committed.  `tick` is the new state's tick.
    fn on_tick_end(&mut self, _tick: Tick, _totals: &Totals) {}

    /// Called every `config.snapshot_interval_ticks` ticks.
    fn on_snapshot(&mut self, _snapshot: &Snapshot) {}

    /// Called once after a bounded run's final tick.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
