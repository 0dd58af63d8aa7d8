//! The `Sim` struct: one run's state, engine and random stream.

use tracing::{debug, info, warn};

use epi_core::{Disease, Interventions, RandomSource, SimConfig, SimRng, Tick};
use epi_engine::{SimulationState, TickReport, TransitionEngine};
use epi_region::{RegionEdit, Totals};

use crate::{SimError, SimObserver, SimResult, Snapshot};

/// A single simulation run.
///
/// Owns the only mutable [`SimulationState`].  The engine replaces it once
/// per [`step`](Self::step); configuration setters change flags, counts and
/// disease parameters between steps.  Every setter addresses regions by
/// their external key and reports a miss with `false` rather than an error.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<R: RandomSource = SimRng> {
    /// Run-level configuration (interval, bound, seed, snapshot cadence).
    pub config: SimConfig,

    /// The disease in play.  Clamped whenever it is replaced.
    pub disease: Disease,

    pub state: SimulationState,

    pub engine: TransitionEngine,

    /// The tick stream.  Consumed strictly in registry order.
    pub rng: R,
}

impl<R: RandomSource> Sim<R> {
    // ── Stepping ──────────────────────────────────────────────────────────

    /// Ticks completed so far.
    pub fn tick(&self) -> Tick {
        self.state.tick
    }

    /// `true` once a bounded run has reached `config.total_ticks`.
    pub fn is_finished(&self) -> bool {
        self.config.end_tick().is_some_and(|end| self.state.tick >= end)
    }

    /// Advance one tick.
    pub fn step(&mut self) -> TickReport {
        let (next, report) = self.engine.step_with_report(&self.state, &self.disease, &mut self.rng);
        self.state = next;

        if let Some(meta) = report.seeded.and_then(|id| self.state.regions.meta(id)) {
            info!(
                tick = %self.state.tick,
                region = %meta.key,
                "{} starts in {}",
                self.disease.name,
                meta.display_name()
            );
        }
        let totals = self.state.regions.totals();
        debug!(
            tick = %self.state.tick,
            infected = totals.infected,
            immune = totals.immune,
            dead = totals.dead,
            active_regions = report.active_regions,
            cross_seeds = report.cross_region_seeds,
            "tick"
        );
        report
    }

    /// Run from the current tick to `config.end_tick()`.
    ///
    /// Open-ended runs (`total_ticks == 0`) belong to
    /// [`SimulationClock`][crate::SimulationClock]; here they are a
    /// configuration error.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<Totals> {
        let Some(end) = self.config.end_tick() else {
            return Err(SimError::Config(
                "Sim::run needs total_ticks > 0; use SimulationClock for open-ended runs".into(),
            ));
        };
        info!(from = %self.state.tick, to = %end, regions = self.state.regions.len(), "run starting");

        while self.state.tick < end {
            self.advance(observer);
        }
        observer.on_sim_end(self.state.tick);

        let totals = self.state.regions.totals();
        info!(
            tick = %self.state.tick,
            population = totals.population,
            infected = totals.infected,
            immune = totals.immune,
            dead = totals.dead,
            "run finished"
        );
        Ok(totals)
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.advance(observer);
        }
    }

    fn advance<O: SimObserver>(&mut self, observer: &mut O) {
        observer.on_tick_start(self.state.tick);
        self.step();
        let tick = self.state.tick;
        observer.on_tick_end(tick, &self.state.regions.totals());

        let every = self.config.snapshot_interval_ticks;
        if every > 0 && tick.0 % every == 0 {
            observer.on_snapshot(&self.snapshot());
        }
    }

    // ── Views ─────────────────────────────────────────────────────────────

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    pub fn totals(&self) -> Totals {
        self.state.regions.totals()
    }

    // ── Configuration ─────────────────────────────────────────────────────

    pub fn set_disease(&mut self, disease: Disease) {
        let disease = disease.sanitized();
        info!(
            name = %disease.name,
            transmission = disease.transmission_probability,
            lethality = disease.lethality,
            incubation_ticks = disease.incubation_ticks,
            doses = disease.required_vaccine_doses,
            "disease updated"
        );
        self.disease = disease;
    }

    pub fn set_interventions(&mut self, key: &str, flags: Interventions) -> bool {
        let Some(id) = self.state.regions.lookup(key) else {
            warn!(region = key, "interventions for unknown region ignored");
            return false;
        };
        self.state.regions.set_interventions(id, flags)
    }

    /// Overwrite a region's counts; values are clamped and normalised.
    pub fn edit_region(&mut self, key: &str, edit: &RegionEdit) -> bool {
        let Some(id) = self.state.regions.lookup(key) else {
            warn!(region = key, "edit for unknown region ignored");
            return false;
        };
        self.state.regions.apply_edit(id, edit)
    }

    /// Choose where the outbreak begins.  Rejected for unknown keys and
    /// once a starting region has been chosen.
    pub fn set_starting_region(&mut self, key: &str) -> bool {
        let Some(id) = self.state.regions.lookup(key) else {
            warn!(region = key, "unknown starting region ignored");
            return false;
        };
        if !self.state.set_starting_region(id) {
            warn!(region = key, tick = %self.state.tick, "starting region already chosen");
            return false;
        }
        info!(region = key, "starting region selected");
        true
    }
}
