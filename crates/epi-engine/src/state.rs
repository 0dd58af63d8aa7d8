//! The simulation state value the engine transforms.

use epi_core::{RegionId, Tick};
use epi_region::RegionStore;

/// Everything that changes from tick to tick.
///
/// A reset is a fresh `SimulationState`; nothing is ever rolled back.
#[derive(Clone, Debug)]
pub struct SimulationState {
    /// Ticks completed so far.  Starts at 0.
    pub tick: Tick,

    /// The registry with this tick's compartment counts.
    pub regions: RegionStore,

    pub(crate) starting_region: Option<RegionId>,
    pub(crate) seeded: bool,
}

impl SimulationState {
    pub fn new(regions: RegionStore) -> Self {
        Self { tick: Tick::ZERO, regions, starting_region: None, seeded: false }
    }

    pub fn starting_region(&self) -> Option<RegionId> {
        self.starting_region
    }

    /// `true` once the starting region has received its first case.
    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    /// Choose where the outbreak begins.
    ///
    /// The first valid choice is final for the run.  A second call, or an
    /// unknown id, is a no-op returning `false`.
    pub fn set_starting_region(&mut self, id: RegionId) -> bool {
        if self.starting_region.is_some() || id.index() >= self.regions.len() {
            return false;
        }
        self.starting_region = Some(id);
        true
    }
}
