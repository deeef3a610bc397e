//! Common metrics for regression
//!
//! This module implements common comparison metrices for continuous variables. Predictions and
//! ground truth are compared column by column, so every metric returns one value per target.

use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix2, Zip};

use crate::{
    error::{Result, ShapeError},
    Float,
};

/// Regression metrices trait
///
/// Implemented for two-dimensional predictions with shape (nsamples, ntargets). To evaluate the
/// accuracy of a prediction, use
/// ```ignore
/// prediction.mean_squared_error(&ground_truth)
/// ```
pub trait Regression<F> {
    /// Maximal absolute error between two continuous variables
    fn max_error<D: Data<Elem = F>>(&self, compare_to: &ArrayBase<D, Ix2>) -> Result<Array1<F>>;
    /// Mean absolute error between two continuous variables
    fn mean_absolute_error<D: Data<Elem = F>>(
        &self,
        compare_to: &ArrayBase<D, Ix2>,
    ) -> Result<Array1<F>>;
    /// Mean squared error between two continuous variables
    fn mean_squared_error<D: Data<Elem = F>>(
        &self,
        compare_to: &ArrayBase<D, Ix2>,
    ) -> Result<Array1<F>>;
    /// R squared coefficient, is the proportion of the variance in the dependent variable that is
    /// predictable from the independent variable.
    ///
    /// A target without variance in the ground truth scores `1` when it is predicted exactly and
    /// `0` otherwise.
    fn r2<D: Data<Elem = F>>(&self, compare_to: &ArrayBase<D, Ix2>) -> Result<Array1<F>>;
}

impl<F: Float, S: Data<Elem = F>> Regression<F> for ArrayBase<S, Ix2> {
    fn max_error<D: Data<Elem = F>>(&self, compare_to: &ArrayBase<D, Ix2>) -> Result<Array1<F>> {
        let residuals = residuals(self, compare_to)?;

        Ok(residuals.fold_axis(Axis(0), F::zero(), |&max, &x| max.max(x.abs())))
    }

    fn mean_absolute_error<D: Data<Elem = F>>(
        &self,
        compare_to: &ArrayBase<D, Ix2>,
    ) -> Result<Array1<F>> {
        residuals(self, compare_to)?
            .mapv(|x| x.abs())
            .mean_axis(Axis(0))
            .ok_or_else(|| ShapeError::Empty.into())
    }

    fn mean_squared_error<D: Data<Elem = F>>(
        &self,
        compare_to: &ArrayBase<D, Ix2>,
    ) -> Result<Array1<F>> {
        residuals(self, compare_to)?
            .mapv(|x| x * x)
            .mean_axis(Axis(0))
            .ok_or_else(|| ShapeError::Empty.into())
    }

    fn r2<D: Data<Elem = F>>(&self, compare_to: &ArrayBase<D, Ix2>) -> Result<Array1<F>> {
        let residuals = residuals(self, compare_to)?;
        let mean = compare_to.mean_axis(Axis(0)).ok_or(ShapeError::Empty)?;

        let ss_res = residuals.mapv(|x| x * x).sum_axis(Axis(0));
        let ss_tot = (compare_to - &mean).mapv(|x| x * x).sum_axis(Axis(0));

        Ok(Zip::from(&ss_res)
            .and(&ss_tot)
            .map_collect(|&res, &tot| {
                if tot > F::zero() {
                    F::one() - res / tot
                } else if res > F::zero() {
                    F::zero()
                } else {
                    F::one()
                }
            }))
    }
}

fn residuals<F: Float, S: Data<Elem = F>, D: Data<Elem = F>>(
    prediction: &ArrayBase<S, Ix2>,
    ground_truth: &ArrayBase<D, Ix2>,
) -> Result<Array2<F>> {
    if prediction.nrows() != ground_truth.nrows() {
        return Err(ShapeError::SampleMismatch {
            records: prediction.nrows(),
            targets: ground_truth.nrows(),
        }
        .into());
    }
    if prediction.ncols() != ground_truth.ncols() {
        return Err(ShapeError::TargetMismatch {
            expected: ground_truth.ncols(),
            actual: prediction.ncols(),
        }
        .into());
    }
    if prediction.nrows() == 0 {
        return Err(ShapeError::Empty.into());
    }

    Ok(prediction - ground_truth)
}
