//! Centroid R-tree and radius-bounded nearest-neighbor queries.
//!
//! # Query strategy
//!
//! The R-tree (via `rstar`) stores `[lon, lat]` points.  A radius query
//! first collects candidates inside a lon/lat box that is guaranteed to
//! contain the search circle (see [`GeoPoint::degree_extent`]), then keeps
//! only those whose haversine distance is within the radius, and finally
//! sorts by `(distance, RegionId)` so ties resolve identically on every run.
//!
//! Cost: O(log N + C log C) where C is the number of candidates in the box.
//! Boxes are not wrapped across the antimeridian.

use rstar::{RTree, RTreeObject, AABB};

use epi_core::{GeoPoint, RegionId};

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct CentroidEntry {
    point: [f64; 2], // [lon, lat]
    pos:   GeoPoint,
    id:    RegionId,
}

impl RTreeObject for CentroidEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

// ── Neighbor ──────────────────────────────────────────────────────────────────

/// One query hit.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Neighbor {
    pub id:         RegionId,
    pub distance_m: f64,
}

// ── SpatialIndex ──────────────────────────────────────────────────────────────

/// Immutable nearest-neighbor structure over region centroids.
///
/// The index does not filter the querying region out of its own results
/// (its distance is 0); callers compare ids.
pub struct SpatialIndex {
    tree: RTree<CentroidEntry>,
}

impl std::fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialIndex").field("len", &self.tree.size()).finish()
    }
}

impl SpatialIndex {
    /// An index with no regions; every query returns nothing.
    pub fn empty() -> Self {
        Self { tree: RTree::new() }
    }

    /// Bulk-load the index from `(id, centroid)` pairs.
    ///
    /// Time complexity: O(N log N).
    pub fn build<I>(centroids: I) -> Self
    where
        I: IntoIterator<Item = (RegionId, GeoPoint)>,
    {
        let entries: Vec<CentroidEntry> = centroids
            .into_iter()
            .map(|(id, pos)| CentroidEntry { point: [pos.lon, pos.lat], pos, id })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Ids of regions whose centroid lies within `radius_m` of `point`,
    /// nearest first, at most `max_results`.
    pub fn nearest(&self, point: GeoPoint, radius_m: f64, max_results: usize) -> Vec<RegionId> {
        self.neighbors(point, radius_m, max_results)
            .into_iter()
            .map(|n| n.id)
            .collect()
    }

    /// Like [`nearest`](Self::nearest) but also reports each distance.
    pub fn neighbors(&self, point: GeoPoint, radius_m: f64, max_results: usize) -> Vec<Neighbor> {
        if max_results == 0 || self.is_empty() || radius_m.is_nan() || radius_m < 0.0 {
            return vec![];
        }

        let (d_lat, d_lon) = point.degree_extent(radius_m);
        let search = AABB::from_corners(
            [point.lon - d_lon, point.lat - d_lat],
            [point.lon + d_lon, point.lat + d_lat],
        );

        let mut hits: Vec<Neighbor> = self
            .tree
            .locate_in_envelope(&search)
            .map(|e| Neighbor { id: e.id, distance_m: point.distance_m(e.pos) })
            .filter(|n| n.distance_m <= radius_m)
            .collect();

        hits.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m).then(a.id.cmp(&b.id)));
        hits.truncate(max_results);
        hits
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::empty()
    }
}
