//! Dataset types
//!
//! This module implements the dataset struct, the ingestion of row collections into matrices and
//! the helper traits used by the algorithm crates to read records and targets.
use ndarray::{ArrayBase, ArrayView2, Ix2, NdFloat, OwnedRepr};
use num_traits::FromPrimitive;
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use std::iter::Sum;

mod impl_dataset;
mod impl_records;
mod impl_targets;
mod ingest;

/// Scalar type of records and targets
///
/// Implemented for `f32` and `f64`. Every bound needed by the solver and the metrics is collected
/// here so that algorithm code only has to name `F: Float`.
pub trait Float:
    NdFloat + FromPrimitive + Default + Sum + approx::AbsDiffEq<Epsilon = Self>
{
}

impl Float for f32 {}

impl Float for f64 {}

/// Feature matrix paired with its targets
///
/// `records` has shape `(nsamples, nfeatures)`. `targets` is either a matrix with shape
/// `(nsamples, ntargets)` or a one-dimensional array for a single target. Both sides are generic,
/// so owned arrays and views can be fitted alike.
///
/// Construction through `new` does not validate anything, see
/// [`Dataset::from_rows`](crate::Dataset::from_rows) for checked ingestion of rows.
///
/// With the `serde` feature owned datasets can be serialized together with fitted models.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetBase<R, T>
where
    R: Records,
{
    pub records: R,
    pub targets: T,
}

/// Owned dataset with one or more targets per sample
pub type Dataset<F> = DatasetBase<ArrayBase<OwnedRepr<F>, Ix2>, ArrayBase<OwnedRepr<F>, Ix2>>;

/// Borrowed form of [`Dataset`]
pub type DatasetView<'a, F> = DatasetBase<ArrayView2<'a, F>, ArrayView2<'a, F>>;

/// Feature matrices with a sample count and a feature count
pub trait Records: Sized {
    type Elem;

    fn nsamples(&self) -> usize;
    fn nfeatures(&self) -> usize;
}

/// Targets of a dataset
///
/// Targets are always exposed as a two-dimensional view with shape (nsamples, ntargets), a
/// one-dimensional target array is viewed as a single column.
pub trait AsTargets {
    type Elem;

    /// Returns a view on targets as two-dimensional array
    fn as_multi_targets(&self) -> ArrayView2<'_, Self::Elem>;

    fn ntargets(&self) -> usize {
        self.as_multi_targets().ncols()
    }
}
