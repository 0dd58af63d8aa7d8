//! Fluent builder for constructing a [`Sim`].

use epi_core::{Disease, RandomSource, SimConfig, SimRng};
use epi_engine::{SimulationState, SpreadParams, TransitionEngine};
use epi_region::RegionStore;

use crate::{Sim, SimError, SimResult};

/// Seed offset of the tick stream, kept apart from population generation.
const TICK_STREAM: u64 = 0x5eed_0002;

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`RegionStore`] — from [`epi_region::RegionStoreBuilder`]
///
/// # Optional inputs (have defaults)
///
/// | Method                  | Default                  |
/// |-------------------------|--------------------------|
/// | `.config(c)`            | `SimConfig::default()`   |
/// | `.disease(d)`           | `Disease::default()`     |
/// | `.spread(p)`            | `SpreadParams::default()`|
/// | `.starting_region(key)` | none (nothing is seeded) |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(regions)
///     .config(config)
///     .disease(Disease::default())
///     .starting_region("BIH.1.1_1")
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    regions:         RegionStore,
    config:          SimConfig,
    disease:         Disease,
    spread:          SpreadParams,
    starting_region: Option<String>,
}

impl SimBuilder {
    pub fn new(regions: RegionStore) -> Self {
        Self {
            regions,
            config:          SimConfig::default(),
            disease:         Disease::default(),
            spread:          SpreadParams::default(),
            starting_region: None,
        }
    }

    pub fn config(mut self, config: SimConfig) -> Self {
        self.config = config;
        self
    }

    pub fn disease(mut self, disease: Disease) -> Self {
        self.disease = disease;
        self
    }

    pub fn spread(mut self, spread: SpreadParams) -> Self {
        self.spread = spread;
        self
    }

    /// External key of the region where the outbreak begins.
    pub fn starting_region(mut self, key: impl Into<String>) -> Self {
        self.starting_region = Some(key.into());
        self
    }

    /// Build with a [`SimRng`] derived from `config.seed`.
    pub fn build(self) -> SimResult<Sim<SimRng>> {
        let rng = SimRng::new(self.config.seed).child(TICK_STREAM);
        self.build_with_rng(rng)
    }

    /// Build with a caller-supplied random source (scripted tests, replays).
    pub fn build_with_rng<R: RandomSource>(self, rng: R) -> SimResult<Sim<R>> {
        let mut regions = self.regions;
        regions.normalize_all();

        let engine = TransitionEngine::new(&regions, self.spread);
        let mut state = SimulationState::new(regions);

        if let Some(key) = self.starting_region {
            let id = state
                .regions
                .lookup(&key)
                .ok_or(SimError::UnknownRegion(key))?;
            state.set_starting_region(id);
        }

        Ok(Sim {
            config: self.config,
            disease: self.disease.sanitized(),
            state,
            engine,
            rng,
        })
    }
}
