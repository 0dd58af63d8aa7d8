//! `epi-sim` — runs the epidemic engine.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                       |
//! |--------------|----------------------------------------------------------------|
//! | [`sim`]      | `Sim`: state + engine + disease + RNG; configuration setters   |
//! | [`builder`]  | `SimBuilder`                                                   |
//! | [`config`]   | `ScenarioConfig` (JSON scenario files, clamped at load)        |
//! | [`snapshot`] | `Snapshot`, `RegionSnapshot`: immutable per-tick views         |
//! | [`observer`] | `SimObserver` hooks for bounded runs                           |
//! | [`clock`]    | `SimulationClock`: timer-driven stepping on Tokio              |
//! | [`error`]    | `SimError`, `SimResult<T>`                                     |
//!
//! # Two ways to drive a simulation
//!
//! ```text
//! Sim::run / run_ticks       synchronous, bounded, observer callbacks
//! SimulationClock            async, one tick per interval, snapshots on a
//!                            watch channel, config edits between ticks
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let regions = RegionStoreBuilder::from_geojson(json, "id_3", 42)?.build()?;
//! let mut sim = SimBuilder::new(regions)
//!     .config(SimConfig { total_ticks: 365, ..SimConfig::default() })
//!     .starting_region("BIH.1.1_1")
//!     .build()?;
//! let totals = sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod clock;
pub mod config;
pub mod error;
pub mod observer;
pub mod sim;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use clock::{MIN_INTERVAL_MS, SimulationClock};
pub use config::{DiseaseInput, ScenarioConfig};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
pub use snapshot::{RegionSnapshot, Snapshot};
