//! Tabular ingestion
//!
//! Turns row-major collections (one `Vec` or slice per sample) into the feature and target
//! matrices of a [`Dataset`]. The copy of the values is distributed over the rayon thread pool,
//! every output row only depends on the matching input row.
use ndarray::{Array2, ArrayView1, Axis};
use rayon::prelude::*;

use super::{Dataset, DatasetBase, Float};
use crate::error::{Result, ShapeError};

impl<F: Float> Dataset<F> {
    /// Build a dataset from borrowed rows, the caller keeps ownership of `records` and `targets`
    ///
    /// # Errors
    ///
    /// * `ShapeError::Empty` if either collection has no rows
    /// * `ShapeError::Ragged` if a row differs in length from the first row of its collection
    /// * `ShapeError::SampleMismatch` if records and targets have different numbers of rows
    pub fn from_rows<Rx, Ry>(records: &[Rx], targets: &[Ry]) -> Result<Self>
    where
        Rx: AsRef<[F]> + Sync,
        Ry: AsRef<[F]> + Sync,
    {
        let nfeatures = row_width::<F, _>(records)?;
        let ntargets = row_width::<F, _>(targets)?;
        check_samples(records.len(), targets.len())?;

        let dataset = DatasetBase::new(
            copy_rows(records, nfeatures),
            copy_rows(targets, ntargets),
        );
        tracing::trace!(
            nsamples = records.len(),
            nfeatures,
            ntargets,
            "copied rows into dataset"
        );

        Ok(dataset)
    }

    /// Build a dataset from owned rows, the values are moved into the matrices
    ///
    /// Produces exactly the same dataset as [`Dataset::from_rows`] and fails under the same
    /// conditions.
    pub fn from_owned_rows(records: Vec<Vec<F>>, targets: Vec<Vec<F>>) -> Result<Self> {
        let nfeatures = row_width::<F, _>(&records)?;
        let ntargets = row_width::<F, _>(&targets)?;
        check_samples(records.len(), targets.len())?;

        let nsamples = records.len();
        let dataset = DatasetBase::new(
            move_rows(records, nfeatures),
            move_rows(targets, ntargets),
        );
        tracing::trace!(nsamples, nfeatures, ntargets, "moved rows into dataset");

        Ok(dataset)
    }
}

/// Width of a rectangular row collection
fn row_width<F, R: AsRef<[F]>>(rows: &[R]) -> std::result::Result<usize, ShapeError> {
    let expected = rows.first().ok_or(ShapeError::Empty)?.as_ref().len();

    match rows
        .iter()
        .map(|row| row.as_ref().len())
        .enumerate()
        .find(|(_, len)| *len != expected)
    {
        Some((row, actual)) => Err(ShapeError::Ragged {
            row,
            expected,
            actual,
        }),
        None => Ok(expected),
    }
}

fn check_samples(records: usize, targets: usize) -> std::result::Result<(), ShapeError> {
    if records != targets {
        return Err(ShapeError::SampleMismatch { records, targets });
    }

    Ok(())
}

fn copy_rows<F: Float, R: AsRef<[F]> + Sync>(rows: &[R], ncols: usize) -> Array2<F> {
    let mut array = Array2::zeros((rows.len(), ncols));

    array
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .zip(rows.par_iter())
        .for_each(|(mut dst, src)| dst.assign(&ArrayView1::from(src.as_ref())));

    array
}

fn move_rows<F: Float>(rows: Vec<Vec<F>>, ncols: usize) -> Array2<F> {
    let mut array = Array2::zeros((rows.len(), ncols));

    array
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .zip(rows.into_par_iter())
        .for_each(|(mut dst, src)| {
            dst.iter_mut()
                .zip(src)
                .for_each(|(value, moved)| *value = moved)
        });

    array
}
