//! Registry loading errors.

use thiserror::Error;

/// Errors produced while loading geography or building a [`RegionStore`].
///
/// [`RegionStore`]: crate::RegionStore
#[derive(Debug, Error)]
pub enum RegionError {
    #[error("geography JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("feature #{index} has no usable id property")]
    MissingId { index: usize },

    #[error("feature {key:?} has neither a bbox nor geometry coordinates")]
    MissingBoundingBox { key: String },

    #[error("duplicate region id {0:?}")]
    DuplicateId(String),

    #[error("region count {0} exceeds the RegionId range")]
    TooManyRegions(usize),
}

pub type RegionResult<T> = Result<T, RegionError>;
