//! Geographic coordinate types and distance helpers.
//!
//! Coordinates are `f64`: region centroids are few (hundreds to low
//! thousands) and neighbor ordering by distance must be stable, so the
//! memory saving of `f32` buys nothing here.

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Approximate length of one degree of latitude in metres.
pub const METRES_PER_DEGREE: f64 = 111_195.0;

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    /// Half-extents `(d_lat, d_lon)` in degrees of a box that contains every
    /// point within `radius_m` of `self`.
    ///
    /// Used to pre-filter R-tree candidates before the exact haversine test.
    /// Near the poles the longitude extent degenerates to the full circle.
    pub fn degree_extent(self, radius_m: f64) -> (f64, f64) {
        let d_lat = radius_m / METRES_PER_DEGREE;
        let max_lat = (self.lat.abs() + d_lat).min(90.0);
        let cos = max_lat.to_radians().cos();
        let d_lon = if cos <= 1e-9 { 180.0 } else { (d_lat / cos).min(180.0) };
        (d_lat, d_lon)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

// ── BoundingBox ───────────────────────────────────────────────────────────────

/// An axis-aligned lon/lat box in GeoJSON `bbox` order
/// (`[west, south, east, north]`).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub west:  f64,
    pub south: f64,
    pub east:  f64,
    pub north: f64,
}

impl BoundingBox {
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self { west, south, east, north }
    }

    /// Build from a GeoJSON `bbox` array.  Only the 2-D form (4 numbers) and
    /// the 3-D form (6 numbers, altitude ignored) are accepted.
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        match *values {
            [w, s, e, n] => Some(Self::new(w, s, e, n)),
            [w, s, _, e, n, _] => Some(Self::new(w, s, e, n)),
            _ => None,
        }
    }

    /// Smallest box containing every `(lon, lat)` position, or `None` when
    /// the iterator is empty.
    pub fn enclosing<I>(positions: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut iter = positions.into_iter();
        let (lon, lat) = iter.next()?;
        let mut bbox = Self::new(lon, lat, lon, lat);
        for (lon, lat) in iter {
            bbox.west  = bbox.west.min(lon);
            bbox.east  = bbox.east.max(lon);
            bbox.south = bbox.south.min(lat);
            bbox.north = bbox.north.max(lat);
        }
        Some(bbox)
    }

    /// Average of the two corners.
    pub fn centroid(&self) -> GeoPoint {
        GeoPoint::new((self.south + self.north) * 0.5, (self.west + self.east) * 0.5)
    }
}
