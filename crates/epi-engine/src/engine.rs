//! `TransitionEngine` — computes state(t+1) from state(t).
//!
//! Every rule reads the tick-start snapshot (`prev`) and writes into a
//! cloned buffer (`next`), so a region processed early in the loop never
//! influences one processed later within the same tick.  Cross-region
//! arrivals are buffered and applied once the loop has finished.

use epi_core::{Disease, RandomSource, RegionId};
use epi_region::RegionStore;
use epi_spatial::SpatialIndex;
use tracing::{debug, trace};

use crate::{SimulationState, SpreadParams};

/// What happened during one [`TransitionEngine::step_with_report`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The starting region, if it received the outbreak's first case this
    /// tick.
    pub seeded: Option<RegionId>,

    /// Regions that had at least one case at the start of the tick.
    pub active_regions: usize,

    /// Successful cross-region transmission attempts.
    pub cross_region_seeds: u32,
}

/// Stateless apart from the neighbor index built at construction.
///
/// The region set is fixed for a run, so the index is built once and
/// reused for every tick.
#[derive(Debug, Default)]
pub struct TransitionEngine {
    index:  SpatialIndex,
    params: SpreadParams,
}

impl TransitionEngine {
    /// Build the neighbor index over `regions`' centroids.
    pub fn new(regions: &RegionStore, params: SpreadParams) -> Self {
        Self::with_index(SpatialIndex::build(regions.centroids()), params)
    }

    pub fn with_index(index: SpatialIndex, params: SpreadParams) -> Self {
        Self { index, params: params.sanitized() }
    }

    pub fn params(&self) -> &SpreadParams {
        &self.params
    }

    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    /// Advance one tick.  Never fails and never mutates `state`.
    pub fn step<R: RandomSource + ?Sized>(
        &self,
        state:   &SimulationState,
        disease: &Disease,
        rng:     &mut R,
    ) -> SimulationState {
        self.step_with_report(state, disease, rng).0
    }

    /// [`step`](Self::step), also returning a summary of the tick.
    pub fn step_with_report<R: RandomSource + ?Sized>(
        &self,
        state:   &SimulationState,
        disease: &Disease,
        rng:     &mut R,
    ) -> (SimulationState, TickReport) {
        let disease = disease.sanitized();
        let p = &self.params;
        let prev = &state.regions;
        let now = state.tick;

        let mut next = state.clone();
        let mut report = TickReport::default();
        let mut inbound = vec![0u32; prev.len()];

        for id in prev.ids() {
            let i = id.index();
            let population = prev.population[i];
            let before = prev.compartments[i];
            let flags = prev.interventions[i];
            let out = &mut next.regions.compartments[i];

            // ① Seed.
            if !next.seeded && state.starting_region == Some(id) {
                if before.infected > 0 {
                    next.seeded = true;
                } else if out.infection_cap(population) > 0 {
                    out.infected = 1;
                    next.seeded = true;
                    report.seeded = Some(id);
                }
            }

            // ② Resolved regions are frozen.
            if before.is_resolved(population) {
                continue;
            }
            let active = before.infected > 0;

            if active {
                report.active_regions += 1;

                // ③ Intra-region spread.
                if before.can_receive(population)
                    && rng.chance(disease.transmission_probability * flags.intra_multiplier())
                {
                    let amount = rng.range_inclusive(p.intra_spread_min, p.intra_spread_max);
                    out.infected = out.infected.saturating_add(amount).min(out.infection_cap(population));
                }

                // ④ Cross-region spread.
                if p.is_significant(before.infected, population) {
                    report.cross_region_seeds +=
                        self.export_cases(prev, id, &disease, rng, &mut inbound);
                }
            }

            // ⑤ Vaccination.
            if flags.vaccines_available {
                let from_infected = rng.portion(before.infected, p.vaccine_infected_fraction);
                let living = population.saturating_sub(before.dead);
                let from_living = rng.portion(living, 1.0 / disease.dose_divisor());

                let ceiling = population.saturating_sub(out.dead);
                let target = u64::from(out.immune) + u64::from(from_infected) + u64::from(from_living);
                if target >= u64::from(ceiling) {
                    out.immune = ceiling;
                    out.infected = 0;
                } else {
                    out.infected = out.infected.saturating_sub(from_infected);
                    out.immune = target as u32;
                }
            }

            // ⑥ Resolution.
            let since = before.infected_since.unwrap_or(now);
            if active && now.since(since) >= u64::from(disease.incubation_ticks) {
                let resolving = rng.portion(before.infected, 1.0).min(out.infected);
                let deaths = ((f64::from(resolving) * disease.lethality).floor() as u32).min(resolving);
                out.infected -= resolving;
                out.dead = out.dead.saturating_add(deaths);
                out.immune = out.immune.saturating_add(resolving - deaths);
            }
        }

        for (j, arrivals) in inbound.into_iter().enumerate() {
            if arrivals == 0 {
                continue;
            }
            let population = next.regions.population[j];
            let c = &mut next.regions.compartments[j];
            c.infected = c.infected.saturating_add(arrivals).min(c.infection_cap(population));
        }

        // ⑦ Normalise, and stamp outbreaks that began this tick.
        let tick = now.next();
        for (c, &population) in next.regions.compartments.iter_mut().zip(&next.regions.population) {
            c.normalize(population);
            if c.infected > 0 && c.infected_since.is_none() {
                c.infected_since = Some(tick);
            }
        }
        next.tick = tick;

        if let Some(id) = report.seeded {
            debug!(tick = %tick, region = %id, "first case seeded");
        }
        trace!(
            tick = %tick,
            active = report.active_regions,
            cross_seeds = report.cross_region_seeds,
            "tick computed"
        );
        (next, report)
    }

    /// One transmission attempt from `source` toward each neighbor in
    /// range.  Successes are added to `inbound`; returns how many there
    /// were.
    fn export_cases<R: RandomSource + ?Sized>(
        &self,
        prev:    &RegionStore,
        source:  RegionId,
        disease: &Disease,
        rng:     &mut R,
        inbound: &mut [u32],
    ) -> u32 {
        let Some(meta) = prev.meta(source) else {
            return 0;
        };
        let p = &self.params;
        let candidates = self.index.nearest(meta.centroid, p.radius_m, p.max_neighbors.saturating_add(1));

        let mut seeded = 0;
        for target in candidates.into_iter().filter(|&t| t != source).take(p.max_neighbors) {
            let j = target.index();
            // Ids outside the registry are skipped silently.
            let (Some(population), Some(c), Some(flags)) =
                (prev.population(target), prev.compartments(target), prev.interventions(target))
            else {
                continue;
            };
            if !c.can_receive(population) {
                continue;
            }
            if rng.chance(disease.transmission_probability * flags.inbound_multiplier()) {
                inbound[j] = inbound[j].saturating_add(1);
                seeded += 1;
            }
        }
        seeded
    }
}
