//! An error when modeling a linear regression
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LinearError>;

/// An error when fitting or querying a linear regression
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinearError {
    #[error(transparent)]
    BaseCrate(#[from] lstsq::Error),
    #[error(transparent)]
    Dimension(#[from] DimensionError),
    #[error("At least one sample needed")]
    NotEnoughSamples,
    #[error("At least one feature needed")]
    NotEnoughFeatures,
    #[error("At least one target needed")]
    NotEnoughTargets,
    #[error("invalid hyper parameter {0}")]
    InvalidParams(String),
    /// Only raised when `max_condition` is configured
    #[error("ill-conditioned gram matrix, pivot ratio {ratio:e} exceeds {limit:e}")]
    IllConditioned { ratio: f64, limit: f64 },
}

/// The number of features or samples does not match what the model or the dataset expects
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionError {
    #[error("expected {expected} features, got {actual}")]
    Features { expected: usize, actual: usize },
    #[error("row {row} has {actual} features, expected {expected}")]
    Row {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("records have {records} samples but targets have {targets}")]
    Samples { records: usize, targets: usize },
}
