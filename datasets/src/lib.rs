//! `lstsq-datasets` loads tabular data from delimiter separated files and generates synthetic
//! regression problems.
//!
//! ## The Big Picture
//!
//! `lstsq-datasets` is the input side of the `lstsq` workspace. It offers two ways to read a
//! delimiter separated file:
//!
//! * [`SeparatedFile`] reads every line into a statically typed tuple, for files with mixed
//!   column types
//! * [`read_matrix`] and [`load_regression`] read a purely numeric file into an `Array2<f64>` or
//!   directly into a [`lstsq::Dataset`] with the trailing columns as targets
//!
//! The [`generate`] module produces noise-free linear problems together with the weights and bias
//! they were generated from.
//!
//! ## Loading a dataset
//!
//! ```no_run
//! use lstsq_datasets::{load_regression, SeparatedReader};
//!
//! // ten feature columns followed by one target column, separated by semicolons
//! let format = SeparatedReader::new().delimiter(';').has_headers(true);
//! let dataset = load_regression("data.csv", &format, 1)?;
//!
//! assert_eq!(dataset.ntargets(), 1);
//! # Ok::<(), lstsq_datasets::DatasetError>(())
//! ```

use std::io::Read;
use std::path::Path;

use lstsq::{Dataset, ShapeError};
use ndarray::{s, Array2};
use ndarray_csv::Array2Reader;

mod delimited;
mod error;
pub mod generate;

pub use delimited::{Row, SeparatedFile, SeparatedReader};
pub use error::{DatasetError, Result};

impl SeparatedReader {
    /// Read a numeric table from `rdr`, every line has to have the same number of columns
    pub fn matrix_from_reader<R: Read>(&self, rdr: R) -> Result<Array2<f64>> {
        let mut reader = self.csv_reader(rdr)?;

        // extract ndarray
        let array = reader.deserialize_array2_dynamic()?;
        Ok(array)
    }
}

/// Read the numeric table in `path`
pub fn read_matrix<P: AsRef<Path>>(path: P, format: &SeparatedReader) -> Result<Array2<f64>> {
    format.matrix_from_reader(delimited::open_file(path.as_ref())?)
}

/// Split the trailing `n_targets` columns of `table` off as targets
///
/// The remaining leading columns become the records. At least one column has to remain for each
/// side.
pub fn split_targets(table: Array2<f64>, n_targets: usize) -> Result<Dataset<f64>> {
    let ncols = table.ncols();
    if n_targets == 0 || n_targets >= ncols {
        return Err(DatasetError::Split { n_targets, ncols });
    }
    if table.nrows() == 0 {
        return Err(lstsq::Error::from(ShapeError::Empty).into());
    }

    let nfeatures = ncols - n_targets;
    let (records, targets) = (
        table.slice(s![.., ..nfeatures]).to_owned(),
        table.slice(s![.., nfeatures..]).to_owned(),
    );

    Ok(Dataset::new(records, targets))
}

/// Read the numeric table in `path` as regression dataset with the last `n_targets` columns as
/// targets
pub fn load_regression<P: AsRef<Path>>(
    path: P,
    format: &SeparatedReader,
    n_targets: usize,
) -> Result<Dataset<f64>> {
    split_targets(read_matrix(path, format)?, n_targets)
}
