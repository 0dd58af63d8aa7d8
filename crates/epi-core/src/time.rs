//! Simulation time model.
//!
//! Time is a monotonically increasing `Tick` counter starting at 0.  A tick
//! has no fixed wall-clock meaning: the simulation clock fires one every
//! `SimConfig::tick_interval_ms` real milliseconds, and disease windows such
//! as the incubation period are expressed directly in ticks.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The tick immediately after `self`.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0.saturating_add(1))
    }

    /// Ticks elapsed from `earlier` to `self`; zero if `earlier` is later.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0.saturating_add(rhs))
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Run-level configuration.
///
/// Typically part of a scenario file loaded by the application and passed to
/// the simulation builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Real milliseconds between ticks when driven by the clock.
    pub tick_interval_ms: u64,

    /// Ticks simulated by a bounded `Sim::run`.  0 means "until stopped".
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Deliver a full snapshot to observers every N ticks.  0 disables.
    pub snapshot_interval_ticks: u64,
}

impl SimConfig {
    /// The tick at which a bounded run ends (exclusive), if bounded.
    #[inline]
    pub fn end_tick(&self) -> Option<Tick> {
        (self.total_ticks > 0).then_some(Tick(self.total_ticks))
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms:        1_000,
            total_ticks:             0,
            seed:                    42,
            snapshot_interval_ticks: 1,
        }
    }
}
