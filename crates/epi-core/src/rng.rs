//! Injectable random sources.
//!
//! # Determinism strategy
//!
//! Every random draw the engine makes goes through the [`RandomSource`]
//! trait, consumed strictly sequentially in registry order.  A run is
//! therefore a pure function of its initial state, its configuration and
//! the stream of `uniform()` values, which means:
//!
//! - Two runs seeded identically with [`SimRng`] produce identical ticks.
//! - Tests can force outcomes with [`FixedRng`] (same value every draw) or
//!   replay a recorded stream with [`SequenceRng`].
//!
//! Derived draws (`chance`, `range_inclusive`, `portion`) are default
//! methods built on `uniform()`, so a scripted source controls them too.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Largest `f64` strictly below 1.0.
const BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

// ── RandomSource ──────────────────────────────────────────────────────────────

/// A stream of uniform samples in `[0, 1)`.
pub trait RandomSource {
    /// Next uniform sample in `[0, 1)`.
    fn uniform(&mut self) -> f64;

    /// `true` when the next sample falls below `p`.
    ///
    /// `p <= 0` never succeeds; `p >= 1` always does.
    #[inline]
    fn chance(&mut self, p: f64) -> bool {
        self.uniform() < p
    }

    /// Integer uniformly distributed in `lo..=hi`.  Returns `lo` if `hi < lo`.
    #[inline]
    fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        let span = f64::from(hi - lo) + 1.0;
        let offset = (self.uniform() * span).floor() as u32;
        lo.saturating_add(offset).min(hi)
    }

    /// `floor(u * n * max_fraction)`: a random share of `n` of at most
    /// `max_fraction`.  Never exceeds `n`.
    #[inline]
    fn portion(&mut self, n: u32, max_fraction: f64) -> u32 {
        let fraction = max_fraction.clamp(0.0, 1.0);
        let drawn = (self.uniform() * f64::from(n) * fraction).floor();
        (drawn as u32).min(n)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    #[inline]
    fn uniform(&mut self) -> f64 {
        (**self).uniform()
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Seedable simulation RNG.
///
/// Used only from the single thread that owns the simulation.  Independent
/// streams (e.g. population generation vs. the tick stream) are split off
/// with [`child`](Self::child) so that one never perturbs the other.
#[derive(Clone, Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}

impl RandomSource for SimRng {
    #[inline]
    fn uniform(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }
}

// ── Scripted sources ──────────────────────────────────────────────────────────

/// Returns the same sample on every draw.
///
/// `FixedRng(0.0)` makes every `chance(p > 0)` succeed with the smallest
/// possible amounts; `FixedRng(0.999)` succeeds only for `p = 1` but yields
/// the largest amounts.  Values are clamped into `[0, 1)`.
#[derive(Copy, Clone, Debug)]
pub struct FixedRng(pub f64);

impl RandomSource for FixedRng {
    #[inline]
    fn uniform(&mut self) -> f64 {
        if self.0.is_nan() { 0.0 } else { self.0.clamp(0.0, BELOW_ONE) }
    }
}

/// Replays a recorded stream of samples, cycling when exhausted.
///
/// An empty sequence behaves like `FixedRng(0.0)`.
#[derive(Clone, Debug)]
pub struct SequenceRng {
    values: Vec<f64>,
    pos:    usize,
}

impl SequenceRng {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, pos: 0 }
    }

    /// Number of samples drawn so far.
    pub fn drawn(&self) -> usize {
        self.pos
    }
}

impl RandomSource for SequenceRng {
    fn uniform(&mut self) -> f64 {
        if self.values.is_empty() {
            self.pos += 1;
            return 0.0;
        }
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        FixedRng(v).uniform()
    }
}
