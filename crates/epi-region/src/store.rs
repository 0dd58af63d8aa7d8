//! `RegionStore`: static region metadata plus per-region mutable state.
//!
//! # Layout
//!
//! Static attributes (key, names, centroid) never change after load and sit
//! behind an `Arc`.  The engine clones the store once per tick to get a
//! next-state buffer, and that clone copies only the three per-region
//! `Vec`s.  Every `Vec` is indexed by `RegionId`:
//!
//! ```ignore
//! let c = store.compartments[id.index()];  // O(1)
//! ```

use std::sync::Arc;

use epi_core::disease::clamp_count;
use epi_core::{GeoPoint, Interventions, RegionId};

use crate::Compartments;

#[cfg(feature = "fx-hash")]
pub(crate) type KeyMap = rustc_hash::FxHashMap<String, RegionId>;
#[cfg(not(feature = "fx-hash"))]
pub(crate) type KeyMap = std::collections::HashMap<String, RegionId>;

// ── RegionMeta ────────────────────────────────────────────────────────────────

/// Immutable per-region attributes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionMeta {
    /// Stable external identifier, unique in the registry.
    pub key: String,
    /// Administrative names, country first.  Display only.
    pub names: Vec<String>,
    pub centroid: GeoPoint,
}

impl RegionMeta {
    /// Most specific non-empty name, or the key when there are none.
    pub fn display_name(&self) -> &str {
        self.names
            .iter()
            .rev()
            .find(|n| !n.is_empty())
            .map_or(self.key.as_str(), String::as_str)
    }
}

// ── RegionEdit ────────────────────────────────────────────────────────────────

/// A manual overwrite of a region's counts from the configuration surface.
///
/// Fields are signed because they come straight from user input; negative
/// values clamp to 0.  `None` leaves the field unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RegionEdit {
    pub population: Option<i64>,
    pub infected:   Option<i64>,
    pub immune:     Option<i64>,
    pub dead:       Option<i64>,
}

// ── Totals ────────────────────────────────────────────────────────────────────

/// Sums across every region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Totals {
    pub population: u64,
    pub infected:   u64,
    pub immune:     u64,
    pub dead:       u64,
}

impl Totals {
    pub fn susceptible(&self) -> u64 {
        self.population
            .saturating_sub(self.infected + self.immune + self.dead)
    }
}

// ── RegionView ────────────────────────────────────────────────────────────────

/// Borrowed view of one region, assembled from the store's columns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionView<'a> {
    pub id:            RegionId,
    pub meta:          &'a RegionMeta,
    pub population:    u32,
    pub compartments:  Compartments,
    pub interventions: Interventions,
}

impl RegionView<'_> {
    pub fn susceptible(&self) -> u32 {
        self.compartments.susceptible(self.population)
    }
}

// ── RegionStore ───────────────────────────────────────────────────────────────

/// The fixed set of regions and their compartment counts.
///
/// Construct with [`RegionStoreBuilder`](crate::RegionStoreBuilder).
#[derive(Clone, Debug)]
pub struct RegionStore {
    meta:   Arc<[RegionMeta]>,
    lookup: Arc<KeyMap>,

    /// Headcount per region.
    pub population: Vec<u32>,

    /// Infected / immune / dead per region.
    pub compartments: Vec<Compartments>,

    /// Policy flags per region.
    pub interventions: Vec<Interventions>,
}

impl RegionStore {
    pub(crate) fn new(meta: Vec<RegionMeta>, lookup: KeyMap, population: Vec<u32>) -> Self {
        let count = meta.len();
        Self {
            meta: meta.into(),
            lookup: Arc::new(lookup),
            population,
            compartments: vec![Compartments::default(); count],
            interventions: vec![Interventions::NONE; count],
        }
    }

    pub fn len(&self) -> usize {
        self.meta.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meta.is_empty()
    }

    /// All region ids in registry (load) order.
    pub fn ids(&self) -> impl Iterator<Item = RegionId> + '_ {
        (0..self.meta.len() as u32).map(RegionId)
    }

    /// `(id, centroid)` pairs for building a spatial index.
    pub fn centroids(&self) -> impl Iterator<Item = (RegionId, GeoPoint)> + '_ {
        self.meta
            .iter()
            .enumerate()
            .map(|(i, m)| (RegionId(i as u32), m.centroid))
    }

    /// Resolve an external key.
    pub fn lookup(&self, key: &str) -> Option<RegionId> {
        self.lookup.get(key).copied()
    }

    pub fn meta(&self, id: RegionId) -> Option<&RegionMeta> {
        self.meta.get(id.index())
    }

    pub fn compartments(&self, id: RegionId) -> Option<&Compartments> {
        self.compartments.get(id.index())
    }

    pub fn population(&self, id: RegionId) -> Option<u32> {
        self.population.get(id.index()).copied()
    }

    pub fn interventions(&self, id: RegionId) -> Option<Interventions> {
        self.interventions.get(id.index()).copied()
    }

    /// Every attribute of one region, or `None` for an unknown id.
    pub fn get(&self, id: RegionId) -> Option<RegionView<'_>> {
        let i = id.index();
        Some(RegionView {
            id,
            meta:          self.meta.get(i)?,
            population:    *self.population.get(i)?,
            compartments:  *self.compartments.get(i)?,
            interventions: *self.interventions.get(i)?,
        })
    }

    /// Replace a region's intervention flags.  Returns `false` for an
    /// unknown id.
    pub fn set_interventions(&mut self, id: RegionId, flags: Interventions) -> bool {
        match self.interventions.get_mut(id.index()) {
            Some(slot) => {
                *slot = flags;
                true
            }
            None => false,
        }
    }

    /// Apply a manual edit, clamping inputs and re-normalising the region.
    /// Returns `false` for an unknown id.
    pub fn apply_edit(&mut self, id: RegionId, edit: &RegionEdit) -> bool {
        let i = id.index();
        if i >= self.len() {
            return false;
        }
        if let Some(p) = edit.population {
            self.population[i] = clamp_count(p);
        }
        let population = self.population[i];
        let c = &mut self.compartments[i];
        if let Some(n) = edit.infected {
            c.infected = clamp_count(n);
        }
        if let Some(n) = edit.immune {
            c.immune = clamp_count(n);
        }
        if let Some(n) = edit.dead {
            c.dead = clamp_count(n);
        }
        c.normalize(population);
        true
    }

    /// Normalise every region (see [`Compartments::normalize`]).
    pub fn normalize_all(&mut self) {
        for (c, &p) in self.compartments.iter_mut().zip(&self.population) {
            c.normalize(p);
        }
    }

    /// Aggregate counts across all regions.
    pub fn totals(&self) -> Totals {
        self.compartments
            .iter()
            .zip(&self.population)
            .fold(Totals::default(), |mut t, (c, &p)| {
                t.population += u64::from(p);
                t.infected += u64::from(c.infected);
                t.immune += u64::from(c.immune);
                t.dead += u64::from(c.dead);
                t
            })
    }
}
