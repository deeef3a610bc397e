//! Utility functions for randomly generating datasets

use lstsq::Dataset;
use ndarray::{Array, Array1, Array2};
use ndarray_rand::{
    rand::Rng,
    rand_distr::{Distribution, Uniform},
    RandomExt,
};

/// A noise-free linear problem together with the parameters it was generated from
#[derive(Debug, Clone, PartialEq)]
pub struct LinearProblem {
    /// samples with targets `Y = X W + b`
    pub dataset: Dataset<f64>,
    /// true weights, shape `(n_features, n_targets)`
    pub weights: Array2<f64>,
    /// true bias, one entry per target
    pub bias: Array1<f64>,
}

/// Special case of `linear_regression_with_distribution` with features, weights and bias drawn
/// uniformly from `[-1, 1)`.
pub fn linear_regression(
    n_samples: usize,
    n_features: usize,
    n_targets: usize,
    rng: &mut impl Rng,
) -> LinearProblem {
    linear_regression_with_distribution(
        n_samples,
        n_features,
        n_targets,
        Uniform::new(-1., 1.),
        rng,
    )
}

/// Generate `n_samples` samples of a random linear model with `n_features` features and
/// `n_targets` targets.
///
/// Features, weights and the bias are all sampled from `distribution`. The targets are computed
/// without noise, so an exact least squares solver recovers the returned weights and bias as long
/// as there are more samples than features.
///
/// ```
/// use lstsq_datasets::generate::linear_regression;
/// use rand::{rngs::SmallRng, SeedableRng};
///
/// let problem = linear_regression(10, 3, 2, &mut SmallRng::seed_from_u64(0));
/// assert_eq!(problem.dataset.targets().dim(), (10, 2));
/// assert_eq!(problem.weights.dim(), (3, 2));
/// ```
pub fn linear_regression_with_distribution(
    n_samples: usize,
    n_features: usize,
    n_targets: usize,
    distribution: impl Distribution<f64> + Copy,
    rng: &mut impl Rng,
) -> LinearProblem {
    let records: Array2<f64> = Array::random_using((n_samples, n_features), distribution, rng);
    let weights: Array2<f64> = Array::random_using((n_features, n_targets), distribution, rng);
    let bias: Array1<f64> = Array::random_using(n_targets, distribution, rng);

    let targets = records.dot(&weights) + &bias;

    LinearProblem {
        dataset: Dataset::new(records, targets),
        weights,
        bias,
    }
}
