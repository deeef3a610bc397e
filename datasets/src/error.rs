use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DatasetError>;

/// An error when loading or generating a dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to open {path}: {source}", path = .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("line {line}: {source}")]
    Parse { line: u64, source: csv::Error },
    #[error("line {line}: expected {expected} columns, got {actual}")]
    ColumnCount {
        line: u64,
        expected: usize,
        actual: usize,
    },
    #[error("delimiter {0:?} is not a single ASCII character")]
    InvalidDelimiter(char),
    #[error("cannot take {n_targets} target columns from a table with {ncols} columns")]
    Split { n_targets: usize, ncols: usize },
    #[error(transparent)]
    Matrix(#[from] ndarray_csv::ReadError),
    #[error(transparent)]
    BaseCrate(#[from] lstsq::Error),
}
