//! Disease parameters shared by every region.

/// Clamp a probability into `[0, 1]`; `NaN` becomes 0.
#[inline]
pub fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

/// Clamp a signed count into `0..=u32::MAX`.
#[inline]
pub fn clamp_count(n: i64) -> u32 {
    n.clamp(0, i64::from(u32::MAX)) as u32
}

/// The single disease in play.
///
/// Mutated only by external configuration between ticks; the engine reads
/// it through [`Disease::sanitized`] so a malformed value can never make a
/// tick fail.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Disease {
    /// Display label only.
    pub name: String,

    /// Probability in `[0, 1]` that one per-tick transmission attempt
    /// succeeds.
    pub transmission_probability: f64,

    /// Probability in `[0, 1]` that a resolving infection ends in death
    /// rather than immunity.
    pub lethality: f64,

    /// Ticks a region must have been infected before its cases start to
    /// resolve into dead or immune.
    pub incubation_ticks: u32,

    /// Doses needed for full protection.  Divides the per-tick vaccination
    /// uptake of the living population.
    pub required_vaccine_doses: u32,
}

impl Disease {
    /// Build from unchecked UI input, clamping every field into its domain.
    pub fn from_raw(
        name:                   impl Into<String>,
        transmission_probability: f64,
        lethality:              f64,
        incubation_ticks:       i64,
        required_vaccine_doses: i64,
    ) -> Self {
        Self {
            name: name.into(),
            transmission_probability: clamp_probability(transmission_probability),
            lethality: clamp_probability(lethality),
            incubation_ticks: clamp_count(incubation_ticks),
            required_vaccine_doses: clamp_count(required_vaccine_doses),
        }
    }

    /// A copy with probabilities clamped into `[0, 1]`.
    pub fn sanitized(&self) -> Self {
        Self {
            name: self.name.clone(),
            transmission_probability: clamp_probability(self.transmission_probability),
            lethality: clamp_probability(self.lethality),
            incubation_ticks: self.incubation_ticks,
            required_vaccine_doses: self.required_vaccine_doses,
        }
    }

    /// Divisor applied to vaccination uptake; at least 1.
    #[inline]
    pub fn dose_divisor(&self) -> f64 {
        f64::from(self.required_vaccine_doses.max(1))
    }
}

impl Default for Disease {
    fn default() -> Self {
        Self {
            name:                     "COVID-19".to_owned(),
            transmission_probability: 0.1,
            lethality:                0.1,
            incubation_ticks:         14,
            required_vaccine_doses:   2,
        }
    }
}
