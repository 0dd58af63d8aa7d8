//! Unit tests for epi-sim.

#[cfg(test)]
mod helpers {
    use epi_core::{Disease, GeoPoint, SimConfig};
    use epi_region::{RegionStore, RegionStoreBuilder};

    /// A (1000, Sarajevo), B (500, ~11 km north), E (0 people, far away).
    pub fn regions() -> RegionStore {
        let mut b = RegionStoreBuilder::new(3);
        b.add_region("A", vec!["BiH".into(), "Sarajevo".into()], GeoPoint::new(43.85, 18.41), Some(1_000));
        b.add_region("B", vec!["BiH".into(), "Zenica".into()], GeoPoint::new(43.95, 18.41), Some(500));
        b.add_region("E", vec![], GeoPoint::new(30.0, 0.0), Some(0));
        b.build().unwrap()
    }

    pub fn contagious() -> Disease {
        Disease {
            name: "Test fever".into(),
            transmission_probability: 1.0,
            lethality: 0.2,
            incubation_ticks: 3,
            required_vaccine_doses: 2,
        }
    }

    pub fn bounded(total_ticks: u64) -> SimConfig {
        SimConfig { total_ticks, snapshot_interval_ticks: 5, ..SimConfig::default() }
    }
}

// ── SimBuilder ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use epi_core::{Disease, FixedRng, RegionId, Tick};

    use super::helpers::*;
    use crate::{SimBuilder, SimError};

    #[test]
    fn builds_with_defaults() {
        let sim = SimBuilder::new(regions()).build().unwrap();
        assert_eq!(sim.tick(), Tick::ZERO);
        assert_eq!(sim.disease, Disease::default());
        assert_eq!(sim.state.starting_region(), None);
        assert_eq!(sim.state.regions.len(), 3);
    }

    #[test]
    fn starting_region_resolved_by_key() {
        let sim = SimBuilder::new(regions()).starting_region("B").build().unwrap();
        assert_eq!(sim.state.starting_region(), Some(RegionId(1)));
    }

    #[test]
    fn unknown_starting_region_errors() {
        let result = SimBuilder::new(regions()).starting_region("Z").build_with_rng(FixedRng(0.0));
        assert!(matches!(result, Err(SimError::UnknownRegion(k)) if k == "Z"));
    }

    #[test]
    fn disease_is_clamped() {
        let mut wild = Disease::default();
        wild.transmission_probability = 4.0;
        wild.lethality = f64::NAN;
        let sim = SimBuilder::new(regions()).disease(wild).build().unwrap();
        assert_eq!(sim.disease.transmission_probability, 1.0);
        assert_eq!(sim.disease.lethality, 0.0);
    }

    #[test]
    fn same_seed_same_run() {
        let run = || {
            let mut sim = SimBuilder::new(regions())
                .config(bounded(60))
                .disease(contagious())
                .starting_region("A")
                .build()
                .unwrap();
            sim.run(&mut crate::NoopObserver).unwrap();
            sim.snapshot()
        };
        assert_eq!(run(), run());
    }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod sim_tests {
    use epi_core::{Disease, FixedRng, Interventions, Tick};
    use epi_region::{RegionEdit, Totals};

    use super::helpers::*;
    use crate::{NoopObserver, SimBuilder, SimError, SimObserver, Snapshot};

    #[derive(Default)]
    struct Counter {
        starts:    u64,
        ends:      u64,
        snapshots: Vec<Tick>,
        finished:  Option<Tick>,
        last:      Totals,
    }

    impl SimObserver for Counter {
        fn on_tick_start(&mut self, _tick: Tick) {
            self.starts += 1;
        }
        fn on_tick_end(&mut self, _tick: Tick, totals: &Totals) {
            self.ends += 1;
            self.last = *totals;
        }
        fn on_snapshot(&mut self, snapshot: &Snapshot) {
            self.snapshots.push(snapshot.tick);
        }
        fn on_sim_end(&mut self, final_tick: Tick) {
            self.finished = Some(final_tick);
        }
    }

    #[test]
    fn run_needs_a_bound() {
        let mut sim = SimBuilder::new(regions()).build().unwrap();
        assert!(matches!(sim.run(&mut NoopObserver), Err(SimError::Config(_))));
        assert_eq!(sim.tick(), Tick::ZERO);
    }

    #[test]
    fn bounded_run_calls_every_hook() {
        let mut sim = SimBuilder::new(regions())
            .config(bounded(10))
            .disease(contagious())
            .starting_region("A")
            .build()
            .unwrap();
        let mut obs = Counter::default();
        let totals = sim.run(&mut obs).unwrap();

        assert_eq!(sim.tick(), Tick(10));
        assert!(sim.is_finished());
        assert_eq!((obs.starts, obs.ends), (10, 10));
        assert_eq!(obs.snapshots, vec![Tick(5), Tick(10)]);
        assert_eq!(obs.finished, Some(Tick(10)));
        assert_eq!(obs.last, totals);
        assert_eq!(totals.population, 1_500);
    }

    #[test]
    fn run_ticks_ignores_the_bound() {
        let mut sim = SimBuilder::new(regions()).config(bounded(2)).build().unwrap();
        sim.run_ticks(7, &mut NoopObserver);
        assert_eq!(sim.tick(), Tick(7));
    }

    #[test]
    fn outbreak_reaches_neighbor() {
        let mut sim = SimBuilder::new(regions())
            .disease(contagious())
            .starting_region("A")
            .build_with_rng(FixedRng(0.0))
            .unwrap();

        let report = sim.step();
        assert_eq!(report.seeded, Some(epi_core::RegionId(0)));
        let snap = sim.snapshot();
        assert_eq!(snap.region("A").unwrap().infected, 1);
        assert_eq!(snap.region("B").unwrap().infected, 0);

        sim.step();
        assert_eq!(sim.snapshot().region("B").unwrap().infected, 1);
    }

    #[test]
    fn setters_address_regions_by_key() {
        let mut sim = SimBuilder::new(regions()).build_with_rng(FixedRng(0.0)).unwrap();
        let lockdown = Interventions { lockdown: true, ..Interventions::NONE };

        assert!(sim.set_interventions("B", lockdown));
        assert!(!sim.set_interventions("nowhere", lockdown));
        assert_eq!(sim.snapshot().region("B").unwrap().interventions, lockdown);

        let edit = RegionEdit { infected: Some(-3), dead: Some(600), ..RegionEdit::default() };
        assert!(sim.edit_region("B", &edit));
        assert!(!sim.edit_region("nowhere", &edit));
        let b = sim.snapshot().region("B").cloned().unwrap();
        assert_eq!((b.infected, b.dead), (0, 500));
    }

    #[test]
    fn starting_region_locked_once_chosen() {
        let mut sim = SimBuilder::new(regions()).build_with_rng(FixedRng(0.5)).unwrap();
        assert!(!sim.set_starting_region("nowhere"));
        assert!(sim.set_starting_region("A"));
        assert!(!sim.set_starting_region("B"));
        sim.step();
        assert!(sim.state.is_seeded());
        assert_eq!(sim.snapshot().region("A").unwrap().infected, 1);
        assert_eq!(sim.snapshot().region("B").unwrap().infected, 0);
        assert!(!sim.set_starting_region("B"));
    }

    #[test]
    fn builder_choice_cannot_be_overridden() {
        let mut sim = SimBuilder::new(regions()).starting_region("A").build_with_rng(FixedRng(0.5)).unwrap();
        assert!(!sim.set_starting_region("B"));
        assert_eq!(sim.state.starting_region(), Some(epi_core::RegionId(0)));
    }

    #[test]
    fn set_disease_sanitises() {
        let mut sim = SimBuilder::new(regions()).build().unwrap();
        sim.set_disease(Disease { transmission_probability: -1.0, ..Disease::default() });
        assert_eq!(sim.disease.transmission_probability, 0.0);
    }
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod snapshot_tests {
    use epi_core::Tick;
    use epi_engine::SimulationState;

    use super::helpers::*;
    use crate::Snapshot;

    #[test]
    fn ratios_and_totals() {
        let mut state = SimulationState::new(regions());
        state.regions.compartments[0].infected = 100;
        state.regions.compartments[0].immune = 300;
        state.regions.compartments[0].dead = 200;
        state.regions.compartments[1].immune = 450;
        state.regions.compartments[1].dead = 50;

        let snap = Snapshot::capture(&state);
        assert_eq!(snap.tick, Tick::ZERO);
        assert!(!snap.seeded);

        let a = snap.region("A").unwrap();
        assert_eq!(a.name, "Sarajevo");
        assert_eq!(a.susceptible, 400);
        assert!((a.infected_ratio - 0.2).abs() < 1e-12);
        assert!((a.immune_ratio - 0.375).abs() < 1e-12);
        assert!((a.dead_ratio - 0.2).abs() < 1e-12);
        assert!(!a.resolved);

        let b = snap.region("B").unwrap();
        assert!(b.resolved);
        assert_eq!(b.infected_ratio, 0.0);
        assert_eq!(b.immune_ratio, 1.0);

        let e = snap.region("E").unwrap();
        assert_eq!((e.dead_ratio, e.immune_ratio), (0.0, 0.0));
        assert!(e.resolved);

        assert_eq!(snap.totals.population, 1_500);
        assert_eq!(snap.totals.infected, 100);
        assert_eq!(snap.totals.immune, 750);
        assert_eq!(snap.totals.dead, 250);
        assert_eq!(snap.totals.susceptible(), 400);
        assert!(snap.region("Z").is_none());
    }

    #[test]
    fn serialises_to_json() {
        let snap = Snapshot::capture(&SimulationState::new(regions()));
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["regions"][1]["key"], "B");
        assert_eq!(json["totals"]["population"], 1_500);
    }
}

// ── ScenarioConfig ────────────────────────────────────────────────────────────

#[cfg(test)]
mod config_tests {
    use epi_core::{FixedRng, RegionId};

    use super::helpers::*;
    use crate::{ScenarioConfig, SimError};

    const SCENARIO: &str = r#"{
        "sim":     { "tick_interval_ms": 250, "total_ticks": 30, "seed": 9 },
        "disease": { "name": "Flu", "transmission_probability": 3.0, "lethality": 0.05,
                     "incubation_ticks": -4, "required_vaccine_doses": 1 },
        "spread":  { "max_neighbors": 2 },
        "starting_region": "A",
        "interventions": { "B": { "lockdown": true, "vaccines_available": true } },
        "edits": { "A": { "immune": 100 } }
    }"#;

    #[test]
    fn full_scenario_loads_and_clamps() {
        let cfg = ScenarioConfig::from_json(SCENARIO).unwrap();
        assert_eq!(cfg.sim.tick_interval_ms, 250);
        assert_eq!(cfg.sim.snapshot_interval_ticks, 1);
        assert_eq!(cfg.spread.max_neighbors, 2);
        assert_eq!(cfg.spread.significance_threshold, 0.001);

        let sim = cfg.into_sim(regions()).unwrap();
        assert_eq!(sim.disease.name, "Flu");
        assert_eq!(sim.disease.transmission_probability, 1.0);
        assert_eq!(sim.disease.incubation_ticks, 0);
        assert_eq!(sim.state.starting_region(), Some(RegionId(0)));
        assert_eq!(sim.engine.params().max_neighbors, 2);

        let snap = sim.snapshot();
        assert!(snap.region("B").unwrap().interventions.lockdown);
        assert!(!snap.region("A").unwrap().interventions.lockdown);
        assert_eq!(snap.region("A").unwrap().immune, 100);
    }

    #[test]
    fn empty_scenario_uses_defaults() {
        let cfg = ScenarioConfig::from_json("{}").unwrap();
        assert_eq!(cfg, ScenarioConfig::default());
        let sim = cfg.into_sim_with_rng(regions(), FixedRng(0.0)).unwrap();
        assert_eq!(sim.disease.name, "COVID-19");
    }

    #[test]
    fn malformed_json_errors() {
        let err = ScenarioConfig::from_json("{ \"sim\": 5 }").unwrap_err();
        assert!(matches!(err, SimError::Scenario(_)));
    }

    #[test]
    fn unknown_region_keys_error() {
        let cfg = ScenarioConfig::from_json(r#"{ "interventions": { "Q": { "masks": true } } }"#).unwrap();
        assert!(matches!(cfg.into_sim(regions()), Err(SimError::UnknownRegion(k)) if k == "Q"));

        let cfg = ScenarioConfig::from_json(r#"{ "starting_region": "Q" }"#).unwrap();
        assert!(matches!(cfg.into_sim(regions()), Err(SimError::UnknownRegion(_))));
    }
}

// ── SimulationClock ───────────────────────────────────────────────────────────

#[cfg(test)]
mod clock_tests {
    use std::time::Duration;

    use epi_core::{FixedRng, Interventions, SimConfig, Tick};
    use tokio::time::Instant;

    use super::helpers::*;
    use crate::{MIN_INTERVAL_MS, Sim, SimBuilder, SimulationClock};

    fn sim(config: SimConfig) -> Sim<FixedRng> {
        SimBuilder::new(regions())
            .config(config)
            .disease(contagious())
            .build_with_rng(FixedRng(0.0))
            .unwrap()
    }

    async fn wait_for(clock: &SimulationClock<FixedRng>, tick: Tick) {
        let mut rx = clock.subscribe();
        while rx.borrow_and_update().tick < tick {
            rx.changed().await.unwrap();
        }
    }

    #[tokio::test]
    async fn step_now_without_timer() {
        let clock = SimulationClock::new(sim(SimConfig::default()));
        assert!(!clock.is_running());
        assert_eq!(clock.latest().tick, Tick::ZERO);

        let snap = clock.step_now().await;
        assert_eq!(snap.tick, Tick(1));
        assert_eq!(clock.latest().tick, Tick(1));
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_at_the_interval_until_stopped() {
        let mut clock = SimulationClock::new(sim(SimConfig::default()));
        let t0 = Instant::now();
        assert!(clock.start(1_000));
        assert!(clock.is_running());

        wait_for(&clock, Tick(3)).await;
        assert!(t0.elapsed() >= Duration::from_millis(3_000));

        assert!(clock.stop().await);
        assert!(!clock.is_running());
        let stopped_at = clock.latest().tick;
        assert_eq!(stopped_at, Tick(3));

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(clock.latest().tick, stopped_at);
        assert!(!clock.stop().await);
    }

    #[tokio::test(start_paused = true)]
    async fn start_is_not_reentrant() {
        let mut clock = SimulationClock::new(sim(SimConfig::default()));
        assert!(clock.start(500));
        assert!(!clock.start(10));
        assert_eq!(clock.interval_ms(), 500);
        clock.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn interval_change_applies_while_running() {
        let mut clock = SimulationClock::new(sim(SimConfig::default()));
        clock.start(1_000);
        wait_for(&clock, Tick(1)).await;

        assert_eq!(clock.set_interval(10), 1_000);
        let t1 = Instant::now();
        wait_for(&clock, Tick(6)).await;
        assert!(t1.elapsed() < Duration::from_millis(1_000));
        clock.stop().await;
    }

    #[tokio::test]
    async fn interval_floor() {
        let clock = SimulationClock::new(sim(SimConfig { tick_interval_ms: 0, ..SimConfig::default() }));
        assert_eq!(clock.interval_ms(), MIN_INTERVAL_MS);
        clock.set_interval(0);
        assert_eq!(clock.interval_ms(), MIN_INTERVAL_MS);
    }

    #[tokio::test]
    async fn configure_publishes_between_ticks() {
        let clock = SimulationClock::new(sim(SimConfig::default()));
        let lockdown = Interventions { lockdown: true, ..Interventions::NONE };
        assert!(clock.configure(|s| s.set_interventions("A", lockdown)).await);
        assert!(clock.latest().region("A").unwrap().interventions.lockdown);

        assert!(clock.set_starting_region("A").await);
        let snap = clock.step_now().await;
        assert!(snap.seeded);
        assert_eq!(snap.region("A").unwrap().infected, 1);
        assert!(!clock.set_starting_region("B").await);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_step_skips_missed_ticks() {
        let mut clock = SimulationClock::new(sim(SimConfig::default()));
        clock.start(100);
        wait_for(&clock, Tick(1)).await; // t = 100 ms

        // Hold the turnstile across the ticks due at 200..=600 ms.
        let busy = clock.shared.sim.lock().await;
        tokio::time::sleep(Duration::from_millis(550)).await;
        drop(busy); // t = 650 ms

        // The step blocked since 200 ms runs, plus the one overdue tick;
        // the other missed intervals are dropped, not replayed.
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(clock.latest().tick, Tick(3));

        // Cadence resumes on the original grid (700 ms).
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(clock.latest().tick, Tick(4));
        clock.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn bounded_run_stops_itself() {
        let mut clock = SimulationClock::new(sim(SimConfig { total_ticks: 4, ..SimConfig::default() }));
        clock.start(100);
        wait_for(&clock, Tick(4)).await;
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(!clock.is_running());
        assert_eq!(clock.latest().tick, Tick(4));
    }
}
