//! Fixed spread constants of the aggregate model.

use epi_core::disease::clamp_probability;

/// Knobs of the cross-region and intra-region rules.
///
/// The defaults are the consolidated model's constants.  Like disease
/// parameters, out-of-range values are clamped rather than rejected (see
/// [`sanitized`](Self::sanitized)).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpreadParams {
    /// `infected / population` at or above which a region starts seeding
    /// its neighbors.
    pub significance_threshold: f64,

    /// Neighbor search radius around a region's centroid, in metres.
    pub radius_m: f64,

    /// Most neighbors one region can seed per tick.
    pub max_neighbors: usize,

    /// Cases added by a successful intra-region attempt, inclusive range.
    pub intra_spread_min: u32,
    pub intra_spread_max: u32,

    /// Largest share of current cases that vaccination can move to immune
    /// in one tick.
    pub vaccine_infected_fraction: f64,
}

impl SpreadParams {
    /// A copy with every field inside its valid domain.
    pub fn sanitized(&self) -> Self {
        let radius_m = if self.radius_m.is_nan() { 0.0 } else { self.radius_m.max(0.0) };
        let lo = self.intra_spread_min.min(self.intra_spread_max);
        let hi = self.intra_spread_min.max(self.intra_spread_max);
        Self {
            significance_threshold: clamp_probability(self.significance_threshold),
            radius_m,
            max_neighbors: self.max_neighbors,
            intra_spread_min: lo,
            intra_spread_max: hi,
            vaccine_infected_fraction: clamp_probability(self.vaccine_infected_fraction),
        }
    }

    /// Whether `infected` cases in `population` are enough to spread
    /// across region borders.  An empty region never is.
    #[inline]
    pub fn is_significant(&self, infected: u32, population: u32) -> bool {
        population > 0
            && infected > 0
            && f64::from(infected) / f64::from(population) >= self.significance_threshold
    }
}

impl Default for SpreadParams {
    fn default() -> Self {
        Self {
            significance_threshold:    0.001,
            radius_m:                  300_000.0,
            max_neighbors:             8,
            intra_spread_min:          1,
            intra_spread_max:          2,
            vaccine_infected_fraction: 0.2,
        }
    }
}
