//! JSON scenario files.
//!
//! A scenario bundles everything the configuration surface can set: run
//! settings, disease, spread constants, the starting region, and per-region
//! interventions and count edits.  Every field is optional.
//!
//! ```json
//! {
//!   "sim":     { "tick_interval_ms": 250, "total_ticks": 365, "seed": 7 },
//!   "disease": { "name": "Flu", "transmission_probability": 0.3, "lethality": 0.02 },
//!   "starting_region": "BIH.1.1_1",
//!   "interventions": { "BIH.1.2_1": { "lockdown": true } },
//!   "edits": { "BIH.1.3_1": { "population": 25000 } }
//! }
//! ```
//!
//! Numbers are clamped into their domain at load: probabilities into
//! `[0, 1]`, counts to `>= 0`.  Only malformed JSON and unknown region keys
//! are errors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use epi_core::{Disease, Interventions, RandomSource, SimConfig, SimRng};
use epi_engine::SpreadParams;
use epi_region::{RegionEdit, RegionStore};

use crate::{Sim, SimBuilder, SimError, SimResult};

/// Disease parameters as typed by a user: signed, unclamped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiseaseInput {
    pub name:                     String,
    pub transmission_probability: f64,
    pub lethality:                f64,
    pub incubation_ticks:         i64,
    pub required_vaccine_doses:   i64,
}

impl DiseaseInput {
    pub fn to_disease(&self) -> Disease {
        Disease::from_raw(
            self.name.clone(),
            self.transmission_probability,
            self.lethality,
            self.incubation_ticks,
            self.required_vaccine_doses,
        )
    }
}

impl Default for DiseaseInput {
    fn default() -> Self {
        let d = Disease::default();
        Self {
            name:                     d.name,
            transmission_probability: d.transmission_probability,
            lethality:                d.lethality,
            incubation_ticks:         i64::from(d.incubation_ticks),
            required_vaccine_doses:   i64::from(d.required_vaccine_doses),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub sim:     SimConfig,
    pub disease: DiseaseInput,
    pub spread:  SpreadParams,

    /// External key of the region where the outbreak begins.
    pub starting_region: Option<String>,

    /// Intervention flags by region key.
    pub interventions: BTreeMap<String, Interventions>,

    /// Count overrides by region key, applied before the first tick.
    pub edits: BTreeMap<String, RegionEdit>,
}

impl ScenarioConfig {
    pub fn from_json(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a [`Sim`] over `regions` with this scenario applied.
    pub fn into_sim(self, regions: RegionStore) -> SimResult<Sim<SimRng>> {
        let rng_seed = self.sim.seed;
        let sim = self.builder(regions).build()?;
        self.finish(sim, rng_seed)
    }

    /// As [`into_sim`](Self::into_sim), with a caller-supplied random source.
    pub fn into_sim_with_rng<R: RandomSource>(self, regions: RegionStore, rng: R) -> SimResult<Sim<R>> {
        let rng_seed = self.sim.seed;
        let sim = self.builder(regions).build_with_rng(rng)?;
        self.finish(sim, rng_seed)
    }

    fn builder(&self, regions: RegionStore) -> SimBuilder {
        let builder = SimBuilder::new(regions)
            .config(self.sim.clone())
            .disease(self.disease.to_disease())
            .spread(self.spread.clone());
        match &self.starting_region {
            Some(key) => builder.starting_region(key.clone()),
            None => builder,
        }
    }

    fn finish<R: RandomSource>(self, mut sim: Sim<R>, seed: u64) -> SimResult<Sim<R>> {
        for (key, flags) in &self.interventions {
            if !sim.set_interventions(key, *flags) {
                return Err(SimError::UnknownRegion(key.clone()));
            }
        }
        for (key, edit) in &self.edits {
            if !sim.edit_region(key, edit) {
                return Err(SimError::UnknownRegion(key.clone()));
            }
        }
        info!(
            seed,
            disease = %sim.disease.name,
            regions = sim.state.regions.len(),
            interventions = self.interventions.len(),
            edits = self.edits.len(),
            "scenario loaded"
        );
        Ok(sim)
    }
}
