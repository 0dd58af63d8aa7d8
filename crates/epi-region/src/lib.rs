//! `epi-region` — the region registry.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                    |
//! |-----------------|-------------------------------------------------------------|
//! | [`compartments`]| `Compartments` counters and the normalisation policy        |
//! | [`store`]       | `RegionStore` (static metadata + per-region SoA state), `RegionEdit`, `Totals` |
//! | [`feature`]     | `GeoFeature`, GeoJSON `FeatureCollection` parsing           |
//! | [`builder`]     | `RegionStoreBuilder` (seeded populations, validation)       |
//! | [`error`]       | `RegionError`, `RegionResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `serde`   | Derives `Serialize`/`Deserialize` on public types.         |
//! | `fx-hash` | FxHash instead of SipHash for key lookups.                 |

pub mod builder;
pub mod compartments;
pub mod error;
pub mod feature;
pub mod store;


pub use builder::RegionStoreBuilder;
pub use compartments::Compartments;
pub use error::{RegionError, RegionResult};
pub use feature::{GeoFeature, parse_feature_collection};
pub use store::{RegionEdit, RegionMeta, RegionStore, RegionView, Totals};
