use epi_region::RegionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("unknown region `{0}`")]
    UnknownRegion(String),

    #[error("malformed scenario: {0}")]
    Scenario(#[from] serde_json::Error),

    #[error(transparent)]
    Region(#[from] RegionError),
}

pub type SimResult<T> = Result<T, SimError>;
