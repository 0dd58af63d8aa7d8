//! Per-region intervention policy flags.

/// Transmission multiplier while social distancing is in force.
pub const DISTANCING_FACTOR: f64 = 0.5;
/// Transmission multiplier while masks are mandated.
pub const MASKS_FACTOR: f64 = 0.5;
/// Transmission multiplier while the region is locked down.
pub const LOCKDOWN_FACTOR: f64 = 0.1;

/// Policy switches set by the user for one region.
///
/// Flags never change inside a tick; the engine only reads them.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Interventions {
    pub distancing:         bool,
    pub masks:              bool,
    pub lockdown:           bool,
    pub vaccines_available: bool,
}

impl Interventions {
    pub const NONE: Interventions = Interventions {
        distancing:         false,
        masks:              false,
        lockdown:           false,
        vaccines_available: false,
    };

    /// Combined multiplier for spread inside the region.  Factors compose
    /// multiplicatively.
    pub fn intra_multiplier(&self) -> f64 {
        let mut m = 1.0;
        if self.distancing {
            m *= DISTANCING_FACTOR;
        }
        if self.masks {
            m *= MASKS_FACTOR;
        }
        if self.lockdown {
            m *= LOCKDOWN_FACTOR;
        }
        m
    }

    /// Multiplier for infections arriving from a neighboring region.  Only
    /// the receiving region's lockdown applies.
    pub fn inbound_multiplier(&self) -> f64 {
        if self.lockdown { LOCKDOWN_FACTOR } else { 1.0 }
    }

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}
