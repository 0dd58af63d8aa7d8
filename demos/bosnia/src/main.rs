//! `bosnia` — an outbreak spreading across eight Bosnian municipalities.
//!
//! Part one runs the embedded scenario synchronously and prints aggregate
//! totals at every snapshot.  Part two replays the same scenario on the
//! `SimulationClock`, speeding it up and ordering a nationwide lockdown
//! while it runs, the way a UI would.
//!
//! Run with:
//!   RUST_LOG=info cargo run -p bosnia --release

mod geography;

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use epi_core::{Interventions, Tick};
use epi_region::feature::DEFAULT_ID_PROPERTY;
use epi_region::{RegionStore, RegionStoreBuilder, Totals};
use epi_sim::{ScenarioConfig, SimObserver, SimulationClock, Snapshot};

use geography::{MUNICIPALITIES, SCENARIO};

/// Tick at which part two speeds the clock up.
const SPEED_UP_AT: Tick = Tick(20);
/// Tick at which part two locks every municipality down.
const LOCKDOWN_AT: Tick = Tick(40);
/// Interval used after the speed-up.
const FAST_INTERVAL_MS: u64 = 5;

// ── Observer ──────────────────────────────────────────────────────────────────

struct TablePrinter;

impl TablePrinter {
    fn header() {
        println!("{:>6}  {:>9}  {:>9}  {:>9}  {:>9}", "tick", "infected", "immune", "dead", "healthy");
    }

    fn row(tick: Tick, t: &Totals) {
        println!(
            "{:>6}  {:>9}  {:>9}  {:>9}  {:>9}",
            tick.0, t.infected, t.immune, t.dead, t.susceptible()
        );
    }
}

impl SimObserver for TablePrinter {
    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        Self::row(snapshot.tick, &snapshot.totals);
    }
}

fn print_regions(snapshot: &Snapshot) {
    println!("{:<20} {:>6} {:>8} {:>7} {:>6}  flags", "municipality", "pop", "infected", "immune", "dead");
    for r in &snapshot.regions {
        let f = r.interventions;
        let flags: String = [(f.distancing, 'D'), (f.masks, 'M'), (f.lockdown, 'L'), (f.vaccines_available, 'V')]
            .iter()
            .map(|&(on, c)| if on { c } else { '.' })
            .collect();
        println!(
            "{:<20} {:>6} {:>8} {:>7} {:>6}  {}{}",
            r.name,
            r.population,
            r.infected,
            r.immune,
            r.dead,
            flags,
            if r.resolved { "  resolved" } else { "" }
        );
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn load_regions(seed: u64) -> Result<RegionStore> {
    let regions = RegionStoreBuilder::from_geojson(MUNICIPALITIES, DEFAULT_ID_PROPERTY, seed)
        .context("parsing municipalities")?
        .build()?;
    Ok(regions)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let scenario = ScenarioConfig::from_json(SCENARIO).context("parsing scenario")?;
    let seed = scenario.sim.seed;
    let end = Tick(scenario.sim.total_ticks);

    // ── Part one: bounded synchronous run ─────────────────────────────────
    let mut sim = scenario.clone().into_sim(load_regions(seed)?)?;
    info!(regions = sim.state.regions.len(), ticks = sim.config.total_ticks, "part one: bounded run");

    let t0 = Instant::now();
    TablePrinter::header();
    let totals = sim.run(&mut TablePrinter)?;
    info!(elapsed_ms = t0.elapsed().as_millis() as u64, dead = totals.dead, "part one done");
    print_regions(&sim.snapshot());

    // ── Part two: the same scenario on the clock ──────────────────────────
    let sim = scenario.into_sim(load_regions(seed)?)?;
    let interval_ms = sim.config.tick_interval_ms;
    let mut clock = SimulationClock::new(sim);
    let mut updates = clock.subscribe();

    info!(interval_ms, "part two: clock-driven run");
    clock.start(interval_ms);

    let mut sped_up = false;
    let mut locked_down = false;
    loop {
        if updates.changed().await.is_err() {
            break;
        }
        let tick = updates.borrow_and_update().tick;
        if tick >= end {
            break;
        }

        if !sped_up && tick >= SPEED_UP_AT {
            clock.set_interval(FAST_INTERVAL_MS);
            sped_up = true;
        }
        if !locked_down && tick >= LOCKDOWN_AT {
            let locked = clock
                .configure(|sim| {
                    let regions = &mut sim.state.regions;
                    let ids: Vec<_> = regions.ids().collect();
                    ids.into_iter()
                        .filter(|&id| {
                            let flags = regions.interventions(id).unwrap_or_default();
                            regions.set_interventions(id, Interventions { lockdown: true, ..flags })
                        })
                        .count()
                })
                .await;
            info!(tick = %tick, regions = locked, "nationwide lockdown");
            locked_down = true;
        }
    }
    clock.stop().await;

    let last = clock.latest();
    TablePrinter::header();
    TablePrinter::row(last.tick, &last.totals);
    print_regions(&last);
    Ok(())
}
