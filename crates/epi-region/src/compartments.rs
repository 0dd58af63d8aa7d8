//! Per-region compartment counters.
//!
//! Only `infected`, `immune` and `dead` are stored.  Susceptible is always
//! derived as `population − infected − immune − dead`.

use epi_core::Tick;

/// Mutable epidemic state of one region.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Compartments {
    pub infected: u32,
    pub immune:   u32,
    pub dead:     u32,
    /// Tick at which the region's current outbreak began.  `None` whenever
    /// `infected == 0`.
    pub infected_since: Option<Tick>,
}

impl Compartments {
    /// Sum of the three stored compartments (widened so it cannot overflow).
    #[inline]
    pub fn occupied(&self) -> u64 {
        u64::from(self.infected) + u64::from(self.immune) + u64::from(self.dead)
    }

    /// Implicit susceptible count.
    #[inline]
    pub fn susceptible(&self, population: u32) -> u32 {
        u64::from(population).saturating_sub(self.occupied()) as u32
    }

    /// Largest `infected` value allowed: `population − immune − dead`.
    #[inline]
    pub fn infection_cap(&self, population: u32) -> u32 {
        population.saturating_sub(self.immune).saturating_sub(self.dead)
    }

    /// Every inhabitant is dead or immune; the region no longer changes.
    #[inline]
    pub fn is_resolved(&self, population: u32) -> bool {
        u64::from(self.dead) + u64::from(self.immune) >= u64::from(population)
    }

    /// Whether a neighbor may still seed an infection here.
    #[inline]
    pub fn can_receive(&self, population: u32) -> bool {
        self.dead < population && self.immune < population && self.infected < population
    }

    /// `true` if the invariant `infected + immune + dead <= population` holds.
    #[inline]
    pub fn is_consistent(&self, population: u32) -> bool {
        self.occupied() <= u64::from(population)
            && (self.infected > 0 || self.infected_since.is_none())
    }

    /// Restore the invariant.
    ///
    /// Policy: `dead` and `immune` are terminal states and authoritative;
    /// `infected` absorbs any excess.  `dead` is clamped to the population,
    /// then `immune` to what remains, then `infected` becomes the residual
    /// if the three together overflow.
    pub fn normalize(&mut self, population: u32) {
        self.dead = self.dead.min(population);
        self.immune = self.immune.min(population - self.dead);
        self.infected = self.infected.min(population - self.dead - self.immune);
        if self.infected == 0 {
            self.infected_since = None;
        }
    }
}
