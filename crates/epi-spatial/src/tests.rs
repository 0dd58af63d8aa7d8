//! Unit tests for epi-spatial.
//!
//! All tests use hand-placed centroids around Sarajevo (43.85 N, 18.41 E).

#[cfg(test)]
mod helpers {
    use epi_core::{GeoPoint, RegionId};
    use crate::SpatialIndex;

    /// Five centroids:
    ///   0: origin
    ///   1: ~11 km north
    ///   2: ~22 km north
    ///   3: ~8 km east
    ///   4: ~330 km south-east (far away)
    pub fn five_regions() -> SpatialIndex {
        SpatialIndex::build([
            (RegionId(0), GeoPoint::new(43.85, 18.41)),
            (RegionId(1), GeoPoint::new(43.95, 18.41)),
            (RegionId(2), GeoPoint::new(44.05, 18.41)),
            (RegionId(3), GeoPoint::new(43.85, 18.51)),
            (RegionId(4), GeoPoint::new(41.50, 21.00)),
        ])
    }
}

#[cfg(test)]
mod queries {
    use epi_core::{GeoPoint, RegionId};
    use crate::SpatialIndex;

    #[test]
    fn empty_index_returns_nothing() {
        let idx = SpatialIndex::empty();
        assert!(idx.is_empty());
        assert!(idx.nearest(GeoPoint::new(0.0, 0.0), 1e9, 10).is_empty());
        let built = SpatialIndex::build(std::iter::empty());
        assert!(built.nearest(GeoPoint::new(0.0, 0.0), 1e9, 10).is_empty());
    }

    #[test]
    fn ordered_by_ascending_distance() {
        let idx = super::helpers::five_regions();
        let hits = idx.nearest(GeoPoint::new(43.85, 18.41), 50_000.0, 10);
        assert_eq!(hits, vec![RegionId(0), RegionId(3), RegionId(1), RegionId(2)]);
    }

    #[test]
    fn self_is_included_at_distance_zero() {
        let idx = super::helpers::five_regions();
        let hits = idx.neighbors(GeoPoint::new(43.85, 18.41), 1.0, 5);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, RegionId(0));
        assert!(hits[0].distance_m < 1e-6);
    }

    #[test]
    fn radius_excludes_far_regions() {
        let idx = super::helpers::five_regions();
        let hits = idx.nearest(GeoPoint::new(43.85, 18.41), 15_000.0, 10);
        assert!(hits.contains(&RegionId(1)));
        assert!(!hits.contains(&RegionId(2)));
        assert!(!hits.contains(&RegionId(4)));
    }

    #[test]
    fn max_results_caps_output() {
        let idx = super::helpers::five_regions();
        let hits = idx.nearest(GeoPoint::new(43.85, 18.41), 1_000_000.0, 2);
        assert_eq!(hits, vec![RegionId(0), RegionId(3)]);
        assert!(idx.nearest(GeoPoint::new(43.85, 18.41), 1_000_000.0, 0).is_empty());
    }

    #[test]
    fn invalid_radius_returns_nothing() {
        let idx = super::helpers::five_regions();
        assert!(idx.nearest(GeoPoint::new(43.85, 18.41), -1.0, 5).is_empty());
        assert!(idx.nearest(GeoPoint::new(43.85, 18.41), f64::NAN, 5).is_empty());
    }

    #[test]
    fn equal_distances_break_ties_by_id() {
        let idx = SpatialIndex::build([
            (RegionId(5), GeoPoint::new(44.0, 18.0)),
            (RegionId(2), GeoPoint::new(44.0, 18.0)),
        ]);
        let hits = idx.nearest(GeoPoint::new(44.0, 18.0), 10.0, 5);
        assert_eq!(hits, vec![RegionId(2), RegionId(5)]);
    }
}
