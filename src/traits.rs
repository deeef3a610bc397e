//! Provide traits for different classes of algorithms
//!

use crate::dataset::{DatasetBase, Records};
use ndarray::{ArrayBase, Data, Ix2};

/// Fittable algorithms
///
/// A fittable algorithm takes a dataset and learns its parameters from it, for ordinary least
/// squares these are the weights and the bias. It returns a model, which can be used to predict
/// targets for new data. The unfitted parameters never predict anything themselves.
pub trait Fit<R: Records, T, E: std::error::Error + From<crate::error::Error>> {
    type Object;

    fn fit(&self, dataset: &DatasetBase<R, T>) -> Result<Self::Object, E>;
}

/// Predict with model into a mutable reference of targets.
///
/// The target buffer is created by `default_target` and filled by `predict_inplace`. Checking
/// the shape of the input against the model is part of `predict_inplace`, which is why it can
/// fail.
pub trait PredictInplace<R: Records, T> {
    type Error: std::error::Error;

    /// Predict something in place
    fn predict_inplace(&self, x: &R, y: &mut T) -> Result<(), Self::Error>;

    /// Create targets that `predict_inplace` works with.
    fn default_target(&self, x: &R) -> T;
}

/// Predict with model
///
/// This trait assumes the `PredictInplace` implementation and provides additional input/output
/// combinations.
pub trait Predict<R, T> {
    fn predict(&self, x: R) -> T;
}

impl<'a, F, D, T, O> Predict<&'a ArrayBase<D, Ix2>, Result<T, O::Error>> for O
where
    D: Data<Elem = F>,
    O: PredictInplace<ArrayBase<D, Ix2>, T>,
{
    fn predict(&self, records: &'a ArrayBase<D, Ix2>) -> Result<T, O::Error> {
        let mut targets = self.default_target(records);
        self.predict_inplace(records, &mut targets)?;

        Ok(targets)
    }
}

impl<'a, F, D, T, O> Predict<&'a DatasetBase<ArrayBase<D, Ix2>, T>, Result<T, O::Error>> for O
where
    D: Data<Elem = F>,
    O: PredictInplace<ArrayBase<D, Ix2>, T>,
{
    fn predict(&self, dataset: &'a DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<T, O::Error> {
        let mut targets = self.default_target(dataset.records());
        self.predict_inplace(dataset.records(), &mut targets)?;

        Ok(targets)
    }
}
