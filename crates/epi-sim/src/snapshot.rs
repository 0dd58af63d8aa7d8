//! Immutable per-tick views handed to the outside world.

use serde::Serialize;

use epi_core::{Interventions, RegionId, Tick};
use epi_engine::SimulationState;
use epi_region::{RegionView, Totals};

/// One region at one tick, plus the ratios a map layer colours by.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegionSnapshot {
    pub id:            RegionId,
    pub key:           String,
    pub name:          String,
    pub population:    u32,
    pub infected:      u32,
    pub immune:        u32,
    pub dead:          u32,
    pub susceptible:   u32,
    pub interventions: Interventions,

    /// `infected / (population − immune − dead)`.
    pub infected_ratio: f64,
    /// `immune / (population − dead)`.
    pub immune_ratio: f64,
    /// `dead / population`.
    pub dead_ratio: f64,
    /// Everyone alive is immune; the region no longer changes.
    pub resolved: bool,
}

impl RegionSnapshot {
    pub fn from_view(view: &RegionView<'_>) -> Self {
        let c = view.compartments;
        let population = view.population;
        let living = population.saturating_sub(c.dead);
        Self {
            id:            view.id,
            key:           view.meta.key.clone(),
            name:          view.meta.display_name().to_owned(),
            population,
            infected:      c.infected,
            immune:        c.immune,
            dead:          c.dead,
            susceptible:   view.susceptible(),
            interventions: view.interventions,
            infected_ratio: ratio(c.infected, living.saturating_sub(c.immune)),
            immune_ratio:   ratio(c.immune, living),
            dead_ratio:     ratio(c.dead, population),
            resolved:       c.is_resolved(population),
        }
    }
}

/// `0.0` for an empty denominator.
fn ratio(part: u32, whole: u32) -> f64 {
    if whole == 0 { 0.0 } else { f64::from(part) / f64::from(whole) }
}

/// The committed state after a tick.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot {
    pub tick:    Tick,
    pub seeded:  bool,
    pub totals:  Totals,
    pub regions: Vec<RegionSnapshot>,
}

impl Snapshot {
    pub fn capture(state: &SimulationState) -> Self {
        let regions = state
            .regions
            .ids()
            .filter_map(|id| state.regions.get(id))
            .map(|view| RegionSnapshot::from_view(&view))
            .collect();
        Self {
            tick: state.tick,
            seeded: state.is_seeded(),
            totals: state.regions.totals(),
            regions,
        }
    }

    /// Look a region up by its external key.
    pub fn region(&self, key: &str) -> Option<&RegionSnapshot> {
        self.regions.iter().find(|r| r.key == key)
    }
}
