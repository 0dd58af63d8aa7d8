//! Fluent builder for [`RegionStore`].
//!
//! # Usage
//!
//! ```rust
//! use epi_core::GeoPoint;
//! use epi_region::RegionStoreBuilder;
//!
//! let mut b = RegionStoreBuilder::new(/*seed=*/ 42);
//! b.add_region("BIH.1.1", vec!["Bosnia and Herzegovina".into()], GeoPoint::new(43.85, 18.41), Some(1_000));
//! b.add_region("BIH.1.2", vec![], GeoPoint::new(44.0, 18.5), None); // seeded random population
//! let store = b.build().unwrap();
//!
//! assert_eq!(store.len(), 2);
//! assert_eq!(store.population[0], 1_000);
//! assert!(store.population[1] < 10_000);
//! ```

use epi_core::{GeoPoint, RegionId, SimRng};

use crate::feature::{parse_feature_collection, GeoFeature};
use crate::store::{KeyMap, RegionMeta};
use crate::{RegionError, RegionResult, RegionStore};

/// Randomly generated populations are drawn from `0..MAX_RANDOM_POPULATION`.
pub const MAX_RANDOM_POPULATION: u32 = 10_000;

/// Seed offset of the population stream, kept apart from the tick stream.
const POPULATION_STREAM: u64 = 0x5eed_0001;

struct PendingRegion {
    meta:       RegionMeta,
    population: Option<u32>,
}

/// Collect regions, then call [`build`](Self::build).
///
/// Regions keep the order in which they were added; that order becomes the
/// `RegionId` numbering and the engine's iteration order.
pub struct RegionStoreBuilder {
    seed:    u64,
    regions: Vec<PendingRegion>,
}

impl RegionStoreBuilder {
    /// `seed` drives the random populations of regions added without one.
    pub fn new(seed: u64) -> Self {
        Self { seed, regions: Vec::new() }
    }

    /// Parse a GeoJSON `FeatureCollection` and add every feature.
    pub fn from_geojson(json: &str, id_property: &str, seed: u64) -> RegionResult<Self> {
        let features = parse_feature_collection(json, id_property)?;
        Ok(Self::new(seed).features(features))
    }

    /// Add a region.  `population: None` draws one from the seeded stream.
    pub fn add_region(
        &mut self,
        key:        impl Into<String>,
        names:      Vec<String>,
        centroid:   GeoPoint,
        population: Option<u32>,
    ) {
        self.regions.push(PendingRegion {
            meta: RegionMeta { key: key.into(), names, centroid },
            population,
        });
    }

    /// Add one geographic feature; its centroid is the bbox average.
    pub fn add_feature(&mut self, feature: GeoFeature) {
        let centroid = feature.centroid();
        self.add_region(feature.key, feature.names, centroid, None);
    }

    pub fn features(mut self, features: impl IntoIterator<Item = GeoFeature>) -> Self {
        for f in features {
            self.add_feature(f);
        }
        self
    }

    /// Fix the population of an already-added region.  Returns `false` if no
    /// region has that key.
    pub fn set_population(&mut self, key: &str, population: u32) -> bool {
        match self.regions.iter_mut().find(|r| r.meta.key == key) {
            Some(r) => {
                r.population = Some(population);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Validate keys and produce the store with all compartments at zero.
    ///
    /// One population sample is drawn per region whether or not it is used,
    /// so overriding one region never shifts the others' populations.
    pub fn build(self) -> RegionResult<RegionStore> {
        let count = self.regions.len();
        if u32::try_from(count).is_err() {
            return Err(RegionError::TooManyRegions(count));
        }

        let mut rng = SimRng::new(self.seed).child(POPULATION_STREAM);
        let mut lookup = KeyMap::default();
        let mut meta = Vec::with_capacity(count);
        let mut population = Vec::with_capacity(count);

        for (i, region) in self.regions.into_iter().enumerate() {
            if lookup.insert(region.meta.key.clone(), RegionId(i as u32)).is_some() {
                return Err(RegionError::DuplicateId(region.meta.key));
            }
            let drawn = rng.gen_range(0..MAX_RANDOM_POPULATION);
            population.push(region.population.unwrap_or(drawn));
            meta.push(region.meta);
        }

        Ok(RegionStore::new(meta, lookup, population))
    }
}
