//! Ordinary Least Squares
#![allow(non_snake_case)]
use lstsq::dataset::{AsTargets, DatasetBase};
use lstsq::traits::{Fit, PredictInplace};
use lstsq::{Float, ShapeError};
use ndarray::linalg::general_mat_vec_mul;
use ndarray::{s, Array1, Array2, ArrayBase, ArrayView1, ArrayViewMut1, Axis, Data, Ix2, Zip};
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::{DimensionError, LinearError, Result};
use crate::hyperparams::LinearRegressionValidParams;
use crate::ldlt::Ldlt;

/// A fitted linear regression model which can be used for making predictions.
///
/// Holds the weights `W` with shape `(n_features, n_targets)` and the bias `b`
/// with one entry per target. A prediction for the sample `x` is `Wᵀ x + b`.
///
/// The model is immutable, so it can be shared between threads and queried
/// concurrently. Fitting again creates a new model.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct FittedLinearRegression<F> {
    weights: Array2<F>,
    bias: Array1<F>,
}

impl<F: Float, D: Data<Elem = F>, T: AsTargets<Elem = F>>
    Fit<ArrayBase<D, Ix2>, T, LinearError> for LinearRegressionValidParams<F>
{
    type Object = FittedLinearRegression<F>;

    /// Fit a linear regression model given a feature matrix `X` and targets `Y`.
    ///
    /// The feature matrix `X` must have shape `(n_samples, n_features)`
    ///
    /// The targets `Y` must have shape `(n_samples, n_targets)`, or `(n_samples)`
    /// for a single target
    ///
    /// Returns a `FittedLinearRegression` object which contains the fitted
    /// weights and bias and can be used to `predict` values of the targets
    /// for new feature values.
    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Self::Object> {
        let X = dataset.records();
        let Y = dataset.as_multi_targets();

        let (n_samples, n_features) = X.dim();
        let n_targets = Y.ncols();

        // Check that our inputs have compatible shapes
        if Y.nrows() != n_samples {
            return Err(DimensionError::Samples {
                records: n_samples,
                targets: Y.nrows(),
            }
            .into());
        }
        if n_samples == 0 {
            return Err(LinearError::NotEnoughSamples);
        }
        if n_features == 0 {
            return Err(LinearError::NotEnoughFeatures);
        }
        if n_targets == 0 {
            return Err(LinearError::NotEnoughTargets);
        }

        let X = if self.fit_intercept() {
            let mut augmented = Array2::ones((n_samples, n_features + 1));
            augmented.slice_mut(s![.., ..n_features]).assign(X);
            augmented
        } else {
            X.to_owned()
        };

        let gram = X.t().dot(&X);
        let rhs = X.t().dot(&Y);
        let ldlt = Ldlt::factorize(gram);

        tracing::debug!(
            n_samples,
            n_features,
            n_targets,
            rank = ldlt.rank(),
            "solving normal equations"
        );
        if ldlt.rank() < ldlt.dim() {
            tracing::debug!(
                rank = ldlt.rank(),
                dim = ldlt.dim(),
                "gram matrix is rank deficient, returning a basic least-squares solution"
            );
        }

        if let Some(limit) = self.max_condition() {
            let ratio = ldlt.pivot_ratio();
            if ratio > limit {
                return Err(LinearError::IllConditioned {
                    ratio: ratio.to_f64().unwrap_or(f64::INFINITY),
                    limit: limit.to_f64().unwrap_or(f64::INFINITY),
                });
            }
        }

        let solution = ldlt.solve(&rhs);
        let (weights, bias) = if self.fit_intercept() {
            (
                solution.slice(s![..n_features, ..]).to_owned(),
                solution.row(n_features).to_owned(),
            )
        } else {
            (solution, Array1::zeros(n_targets))
        };

        Ok(FittedLinearRegression { weights, bias })
    }
}

/// View the fitted parameters and make predictions with a fitted
/// linear regression model.
impl<F: Float> FittedLinearRegression<F> {
    /// Get the fitted weights with shape `(n_features, n_targets)`
    pub fn weights(&self) -> &Array2<F> {
        &self.weights
    }

    /// Get the fitted bias, zero if no intercept was fitted
    pub fn bias(&self) -> &Array1<F> {
        &self.bias
    }

    pub fn nfeatures(&self) -> usize {
        self.weights.nrows()
    }

    pub fn ntargets(&self) -> usize {
        self.weights.ncols()
    }

    /// Predict the targets of a single sample
    ///
    /// Fails with `DimensionError::Features` if `x` does not have exactly
    /// `nfeatures()` values, it is never truncated or padded.
    pub fn predict_one(&self, x: &[F]) -> Result<Array1<F>> {
        if x.len() != self.nfeatures() {
            return Err(DimensionError::Features {
                expected: self.nfeatures(),
                actual: x.len(),
            }
            .into());
        }

        let mut y = Array1::zeros(self.ntargets());
        self.predict_into(ArrayView1::from(x), y.view_mut());

        Ok(y)
    }

    /// Predict the targets of a batch of samples
    ///
    /// Rows are evaluated in parallel, row `i` of the result belongs to `rows[i]`. Every row is
    /// checked on its own, if any has the wrong number of features the call fails with
    /// `DimensionError::Row` naming the first such row.
    pub fn predict_rows<R: AsRef<[F]> + Sync>(&self, rows: &[R]) -> Result<Array2<F>> {
        let n_features = self.nfeatures();
        let mut targets = Array2::zeros((rows.len(), self.ntargets()));

        let mismatch = targets
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .zip(rows.par_iter())
            .enumerate()
            .filter_map(|(row, (target, x))| {
                let x = x.as_ref();
                if x.len() != n_features {
                    return Some((row, x.len()));
                }
                self.predict_into(ArrayView1::from(x), target);
                None
            })
            .min();

        match mismatch {
            Some((row, actual)) => Err(DimensionError::Row {
                row,
                expected: n_features,
                actual,
            }
            .into()),
            None => Ok(targets),
        }
    }

    fn predict_into(&self, x: ArrayView1<F>, mut y: ArrayViewMut1<F>) {
        y.assign(&self.bias);
        general_mat_vec_mul(F::one(), &self.weights.t(), &x, F::one(), &mut y);
    }
}

impl<F: Float, D: Data<Elem = F>> PredictInplace<ArrayBase<D, Ix2>, Array2<F>>
    for FittedLinearRegression<F>
{
    type Error = LinearError;

    /// Given an input matrix `X`, with shape `(n_samples, n_features)`,
    /// `predict` returns the targets according to the linear model
    /// learned from the training data distribution.
    fn predict_inplace(&self, x: &ArrayBase<D, Ix2>, y: &mut Array2<F>) -> Result<()> {
        if x.ncols() != self.nfeatures() {
            return Err(DimensionError::Features {
                expected: self.nfeatures(),
                actual: x.ncols(),
            }
            .into());
        }
        if y.nrows() != x.nrows() {
            return Err(DimensionError::Samples {
                records: x.nrows(),
                targets: y.nrows(),
            }
            .into());
        }
        if y.ncols() != self.ntargets() {
            return Err(lstsq::Error::from(ShapeError::TargetMismatch {
                expected: self.ntargets(),
                actual: y.ncols(),
            })
            .into());
        }

        Zip::from(y.rows_mut())
            .and(x.rows())
            .par_for_each(|target, x| self.predict_into(x, target));

        Ok(())
    }

    fn default_target(&self, x: &ArrayBase<D, Ix2>) -> Array2<F> {
        Array2::zeros((x.nrows(), self.ntargets()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LinearRegression;
    use approx::assert_abs_diff_eq;
    use lstsq::traits::Predict;
    use lstsq::{Dataset, ParamGuard};
    use ndarray::{array, Array};
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn fits_a_line_through_two_dots() {
        let lin_reg = LinearRegression::new();
        let dataset = Dataset::new(array![[0f64], [1.]], array![[1.], [2.]]);
        let model = lin_reg.fit(&dataset).unwrap();
        let result = model.predict(dataset.records()).unwrap();

        assert_abs_diff_eq!(result, array![[1.], [2.]], epsilon = 1e-12);
    }

    /// When `with_intercept` is set to false, the
    /// fitted line runs through the origin. For a perfect
    /// fit we only need to provide one point.
    #[test]
    fn without_intercept_fits_line_through_origin() {
        let lin_reg = LinearRegression::new().with_intercept(false);
        let dataset = DatasetBase::new(array![[1.]], array![1.]);
        let model = lin_reg.fit(&dataset).unwrap();
        let result = model.predict(&array![[0.], [1.]]).unwrap();

        assert_abs_diff_eq!(result, array![[0.], [1.]], epsilon = 1e-12);
        assert_eq!(model.bias(), &array![0.]);
    }

    /// We can't fit a line through two points without fitting the
    /// intercept in general. In this case we should find the solution
    /// that minimizes the squares. Fitting a line through the origin
    /// and the points (-1, 1), (1, 1) has the least-squares solution
    /// f(x) = 0
    #[test]
    fn fits_least_squares_line_through_two_dots() {
        let lin_reg = LinearRegression::new().with_intercept(false);
        let dataset = DatasetBase::new(array![[-1.], [1.]], array![1., 1.]);
        let model = lin_reg.fit(&dataset).unwrap();
        let result = model.predict(dataset.records()).unwrap();

        assert_abs_diff_eq!(result, array![[0.], [0.]], epsilon = 1e-12);
    }

    /// We can't fit a line through three points in general
    /// - in this case we should find the solution that minimizes
    /// the squares. Fitting a line with intercept through the
    /// points (0, 0), (1, 0), (2, 2) has the least-squares solution
    /// f(x) = -1./3. + x
    #[test]
    fn fits_least_squares_line_through_three_dots() {
        let lin_reg = LinearRegression::new();
        let dataset = DatasetBase::new(array![[0.], [1.], [2.]], array![0., 0., 2.]);
        let model = lin_reg.fit(&dataset).unwrap();
        let actual = model.predict(dataset.records()).unwrap();

        assert_abs_diff_eq!(
            actual,
            array![[-1. / 3.], [2. / 3.], [5. / 3.]],
            epsilon = 1e-10
        );
    }

    /// Check that the linear regression prefectly fits three datapoints for
    /// the model
    /// f(x) = (x + 1)^2 = x^2 + 2x + 1
    #[test]
    fn fits_three_parameters_through_three_dots() {
        let lin_reg = LinearRegression::new();
        let dataset = DatasetBase::new(array![[0f64, 0.], [1., 1.], [2., 4.]], array![1., 4., 9.]);
        let model = lin_reg.fit(&dataset).unwrap();

        assert_abs_diff_eq!(model.weights(), &array![[2.], [1.]], epsilon = 1e-10);
        assert_abs_diff_eq!(model.bias(), &array![1.], epsilon = 1e-10);
    }

    /// Check that the linear regression prefectly fits four datapoints for
    /// the model
    /// f(x) = (x + 1)^3 = x^3 + 3x^2 + 3x + 1
    #[test]
    fn fits_four_parameters_through_four_dots() {
        let lin_reg = LinearRegression::new();
        let dataset = DatasetBase::new(
            array![[0f64, 0., 0.], [1., 1., 1.], [2., 4., 8.], [3., 9., 27.]],
            array![1., 8., 27., 64.],
        );
        let model = lin_reg.fit(&dataset).unwrap();

        assert_abs_diff_eq!(model.weights(), &array![[3.], [3.], [1.]], epsilon = 1e-8);
        assert_abs_diff_eq!(model.bias(), &array![1.], epsilon = 1e-8);
    }

    #[test]
    fn fits_three_parameters_through_three_dots_f32() {
        let lin_reg = LinearRegression::new();
        let dataset = DatasetBase::new(array![[0f32, 0.], [1., 1.], [2., 4.]], array![1f32, 4., 9.]);
        let model = lin_reg.fit(&dataset).unwrap();

        assert_abs_diff_eq!(model.weights(), &array![[2f32], [1.]], epsilon = 1e-3);
        assert_abs_diff_eq!(model.bias(), &array![1f32], epsilon = 1e-3);
    }

    #[test]
    fn predicts_a_perfect_line() {
        let x = vec![vec![1.], vec![2.], vec![3.], vec![4.]];
        let y = vec![vec![2.], vec![4.], vec![6.], vec![8.]];
        let dataset = Dataset::from_rows(&x, &y).unwrap();
        let model = LinearRegression::new().fit(&dataset).unwrap();

        assert_abs_diff_eq!(model.predict_one(&[5.]).unwrap(), array![10.], epsilon = 1e-6);
        assert_abs_diff_eq!(
            model.predict_rows(&[[1.], [2.]]).unwrap(),
            array![[2.], [4.]],
            epsilon = 1e-6
        );
    }

    #[test]
    fn fits_multiple_targets_at_once() {
        // y0 = x0 - 2 x1 + 3, y1 = 0.5 x1 - 1
        let x = array![[0., 0.], [1., 0.], [0., 1.], [2., 3.], [-1., 4.]];
        let y = Array::from_shape_fn((5, 2), |(i, j)| {
            let (x0, x1) = (x[[i, 0]], x[[i, 1]]);
            if j == 0 {
                x0 - 2. * x1 + 3.
            } else {
                0.5 * x1 - 1.
            }
        });
        let model = LinearRegression::new()
            .fit(&DatasetBase::new(x.clone(), y.clone()))
            .unwrap();

        assert_abs_diff_eq!(
            model.weights(),
            &array![[1., 0.], [-2., 0.5]],
            epsilon = 1e-10
        );
        assert_abs_diff_eq!(model.bias(), &array![3., -1.], epsilon = 1e-10);
        assert_abs_diff_eq!(model.predict(&x).unwrap(), y, epsilon = 1e-10);
    }

    #[test]
    fn recovers_exactly_linear_data() {
        let mut rng = SmallRng::seed_from_u64(42);
        let problem = lstsq_datasets::generate::linear_regression(200, 6, 3, &mut rng);
        let model = LinearRegression::new().fit(&problem.dataset).unwrap();

        assert_abs_diff_eq!(model.weights(), &problem.weights, epsilon = 1e-8);
        assert_abs_diff_eq!(model.bias(), &problem.bias, epsilon = 1e-8);
        assert_abs_diff_eq!(
            model.predict(&problem.dataset).unwrap(),
            problem.dataset.targets().view(),
            epsilon = 1e-8
        );
    }

    #[test]
    fn keeps_features_of_very_different_scale() {
        let x = Array::from_shape_fn((200, 2), |(i, j)| {
            let t = i as f64;
            if j == 0 {
                1e6 * (0.37 * t).sin()
            } else {
                1e-2 * (1.3 * t).cos()
            }
        });
        let y = x.column(0).mapv(|v| 2. * v) + x.column(1).mapv(|v| 300. * v) + 1.;
        let dataset = DatasetBase::new(x, y);

        let model = LinearRegression::new().fit(&dataset).unwrap();

        assert_abs_diff_eq!(model.weights().column(0), array![2., 300.], epsilon = 1e-4);
        assert_abs_diff_eq!(model.bias(), &array![1.], epsilon = 1e-4);
        let err = (model.predict(dataset.records()).unwrap().column(0).to_owned() - dataset.targets())
            .mapv(f64::abs)
            .fold(0., |max: f64, &e| max.max(e));
        assert!(err < 1e-6, "max error {}", err);
    }

    #[test]
    fn batch_prediction_matches_single_predictions() {
        let mut rng = SmallRng::seed_from_u64(7);
        let problem = lstsq_datasets::generate::linear_regression(50, 4, 2, &mut rng);
        let model = LinearRegression::new().fit(&problem.dataset).unwrap();

        let rows: Vec<Vec<f64>> = problem
            .dataset
            .records()
            .rows()
            .into_iter()
            .map(|row| row.to_vec())
            .collect();

        let batch = model.predict_rows(&rows).unwrap();
        let matrix = model.predict(problem.dataset.records()).unwrap();
        for (i, row) in rows.iter().enumerate() {
            let single = model.predict_one(row).unwrap();
            assert_eq!(batch.row(i), single);
            assert_abs_diff_eq!(matrix.row(i), single, epsilon = 1e-12);
        }
    }

    #[test]
    fn prediction_is_idempotent() {
        let dataset = DatasetBase::new(array![[0.], [1.], [2.]], array![0., 0., 2.]);
        let model = LinearRegression::new().fit(&dataset).unwrap();

        assert_eq!(
            model.predict_rows(&[[0.5], [7.]]).unwrap(),
            model.predict_rows(&[[0.5], [7.]]).unwrap()
        );
        assert_eq!(model.predict_one(&[3.]), model.predict_one(&[3.]));
    }

    #[test]
    fn single_sample_gives_an_exact_fit() {
        let dataset = DatasetBase::new(array![[3.]], array![6.]);
        let model = LinearRegression::new().fit(&dataset).unwrap();

        assert_abs_diff_eq!(model.predict_one(&[3.]).unwrap(), array![6.], epsilon = 1e-12);
    }

    #[test]
    fn rank_deficient_data_is_accepted() {
        // both features carry the same information
        let dataset = DatasetBase::new(array![[1., 1.], [2., 2.], [3., 3.]], array![2., 4., 6.]);
        let model = LinearRegression::new().fit(&dataset).unwrap();

        assert_abs_diff_eq!(
            model.predict(dataset.records()).unwrap(),
            array![[2.], [4.], [6.]],
            epsilon = 1e-10
        );

        let strict = LinearRegression::new().max_condition(Some(1e10));
        assert!(matches!(
            strict.fit(&dataset),
            Err(LinearError::IllConditioned { .. })
        ));
    }

    #[test]
    fn well_conditioned_data_passes_the_condition_check() {
        let dataset = DatasetBase::new(array![[0.], [1.], [2.]], array![0., 0., 2.]);
        let model = LinearRegression::new()
            .max_condition(Some(1e6))
            .fit(&dataset);

        assert!(model.is_ok());
    }

    #[test]
    fn rejects_too_many_features() {
        let dataset = DatasetBase::new(array![[1.], [2.], [3.], [4.]], array![2., 4., 6., 8.]);
        let model = LinearRegression::new().fit(&dataset).unwrap();

        assert_eq!(
            model.predict_one(&[5., 1.]),
            Err(LinearError::Dimension(DimensionError::Features {
                expected: 1,
                actual: 2
            }))
        );
        assert_eq!(
            model.predict(&array![[1., 2.]]),
            Err(LinearError::Dimension(DimensionError::Features {
                expected: 1,
                actual: 2
            }))
        );
    }

    #[test]
    fn rejects_wrongly_shaped_target_buffers() {
        let dataset = DatasetBase::new(array![[1.], [2.], [3.]], array![2., 4., 6.]);
        let model = LinearRegression::new().fit(&dataset).unwrap();
        let x = array![[1.], [2.]];

        let mut short = Array2::zeros((1, 1));
        assert_eq!(
            model.predict_inplace(&x, &mut short),
            Err(LinearError::Dimension(DimensionError::Samples {
                records: 2,
                targets: 1
            }))
        );

        let mut wide = Array2::zeros((2, 3));
        assert_eq!(
            model.predict_inplace(&x, &mut wide),
            Err(LinearError::BaseCrate(lstsq::Error::Shape(
                ShapeError::TargetMismatch {
                    expected: 1,
                    actual: 3
                }
            )))
        );

        let mut fitting = model.default_target(&x);
        model.predict_inplace(&x, &mut fitting).unwrap();
        assert_abs_diff_eq!(fitting, array![[2.], [4.]], epsilon = 1e-10);
    }

    #[test]
    fn batch_reports_the_first_bad_row() {
        let dataset = DatasetBase::new(array![[1., 0.], [0., 1.], [1., 1.]], array![1., 2., 3.]);
        let model = LinearRegression::new().fit(&dataset).unwrap();
        let rows = vec![
            vec![1., 1.],
            vec![2., 2.],
            vec![1.],
            vec![0., 0.],
            vec![1., 2., 3.],
        ];

        assert_eq!(
            model.predict_rows(&rows),
            Err(LinearError::Dimension(DimensionError::Row {
                row: 2,
                expected: 2,
                actual: 1
            }))
        );
    }

    #[test]
    fn rejects_malformed_training_data() {
        let model = LinearRegression::new();

        let mismatch = DatasetBase::new(array![[1.], [2.], [3.]], array![1., 2.]);
        assert_eq!(
            model.fit(&mismatch),
            Err(LinearError::Dimension(DimensionError::Samples {
                records: 3,
                targets: 2
            }))
        );

        let no_features = DatasetBase::new(Array2::<f64>::zeros((3, 0)), array![1., 2., 3.]);
        assert_eq!(model.fit(&no_features), Err(LinearError::NotEnoughFeatures));

        let no_samples = DatasetBase::new(Array2::<f64>::zeros((0, 2)), Array1::<f64>::zeros(0));
        assert_eq!(model.fit(&no_samples), Err(LinearError::NotEnoughSamples));

        let no_targets = DatasetBase::new(Array2::<f64>::ones((2, 1)), Array2::<f64>::zeros((2, 0)));
        assert_eq!(model.fit(&no_targets), Err(LinearError::NotEnoughTargets));
    }

    #[test]
    fn invalid_params_fail_before_fitting() {
        let dataset = DatasetBase::new(array![[0.], [1.]], array![1., 2.]);
        let res = LinearRegression::new()
            .max_condition(Some(0.1))
            .fit(&dataset);

        assert!(matches!(res, Err(LinearError::InvalidParams(_))));
    }

    #[test]
    fn fitted_model_is_shared_between_threads() {
        let dataset = DatasetBase::new(array![[1.], [2.], [3.], [4.]], array![2., 4., 6., 8.]);
        let model = LinearRegression::new().check().unwrap().fit(&dataset).unwrap();

        let predictions: Vec<f64> = (0..64)
            .into_par_iter()
            .map(|i| model.predict_one(&[i as f64]).unwrap()[0])
            .collect();

        for (i, prediction) in predictions.into_iter().enumerate() {
            assert_abs_diff_eq!(prediction, 2. * i as f64, epsilon = 1e-9);
        }
    }
}
