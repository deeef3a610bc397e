//! Error types in lstsq
//!

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// Malformed tabular input, detected while turning rows into matrices
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("at least one sample needed")]
    Empty,
    #[error("row {row} has {actual} values, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("records have {records} samples but targets have {targets}")]
    SampleMismatch { records: usize, targets: usize },
    #[error("expected {expected} targets, got {actual}")]
    TargetMismatch { expected: usize, actual: usize },
}
