//! `epi-core` — foundational types for the `rust_epi` spread simulator.
//!
//! This crate is a dependency of every other `epi-*` crate.  It has no
//! `epi-*` dependencies and a single required external one (`rand`, plus
//! optional `serde`).  Nothing here can fail: out-of-range inputs are
//! clamped, and errors live in the crates that load data.
//!
//! # What lives here
//!
//! | Module           | Contents                                             |
//! |------------------|------------------------------------------------------|
//! | [`ids`]          | `RegionId`                                           |
//! | [`geo`]          | `GeoPoint`, `BoundingBox`, haversine distance        |
//! | [`time`]         | `Tick`, `SimConfig`                                  |
//! | [`rng`]          | `RandomSource` trait, `SimRng`, `FixedRng`, `SequenceRng` |
//! | [`disease`]      | `Disease` parameter bag                              |
//! | [`intervention`] | `Interventions` per-region policy flags              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod disease;
pub mod geo;
pub mod ids;
pub mod intervention;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use disease::Disease;
pub use geo::{BoundingBox, GeoPoint};
pub use ids::RegionId;
pub use intervention::Interventions;
pub use rng::{FixedRng, RandomSource, SequenceRng, SimRng};
pub use time::{SimConfig, Tick};
