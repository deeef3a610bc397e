use lstsq::{Float, ParamGuard};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::{LinearError, Result};

/// Checked hyper-parameters of an ordinary least squares regression
///
/// Obtained from [`LinearRegression`] by calling `check()`, or implicitly by calling `fit` on the
/// unchecked parameters.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRegressionValidParams<F> {
    pub(crate) fit_intercept: bool,
    pub(crate) max_condition: Option<F>,
}

impl<F: Float> LinearRegressionValidParams<F> {
    pub fn fit_intercept(&self) -> bool {
        self.fit_intercept
    }

    pub fn max_condition(&self) -> Option<F> {
        self.max_condition
    }
}

/// An ordinary least squares linear regression model.
///
/// LinearRegression fits a linear model to minimize the residual sum of
/// squares between the observed targets in the dataset, and the targets
/// predicted by the linear approximation.
///
/// Ordinary least squares regression solves the overconstrained model
///
/// Y = X W + b
///
/// by finding W and b which minimize the L_2 norm ||Y - X W - b||_2. The
/// bias is found together with the weights by appending a column of ones to
/// `X` and solving the normal equations of the augmented system.
///
/// ## Examples
///
/// ```rust
/// use lstsq::traits::Fit;
/// use lstsq::Dataset;
/// use lstsq_linear::LinearRegression;
///
/// let dataset: Dataset<f64> = Dataset::from_rows(&[[1.], [2.], [3.]], &[[3.], [5.], [7.]]).unwrap();
/// let model = LinearRegression::new().fit(&dataset).unwrap();
///
/// assert!((model.predict_one(&[4.]).unwrap()[0] - 9.).abs() < 1e-9);
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRegression<F>(LinearRegressionValidParams<F>);

impl<F: Float> Default for LinearRegression<F> {
    fn default() -> Self {
        LinearRegression::new()
    }
}

/// Configure and fit a linear regression model
impl<F: Float> LinearRegression<F> {
    /// Create a default linear regression model.
    /// By default, an intercept will be fitted and no conditioning check is done.
    pub fn new() -> LinearRegression<F> {
        LinearRegression(LinearRegressionValidParams {
            fit_intercept: true,
            max_condition: None,
        })
    }

    /// Configure the linear regression model to fit an intercept.
    /// Defaults to `true` if not set.
    ///
    /// Without an intercept no column of ones is appended and the fitted
    /// bias is zero for every target.
    pub fn with_intercept(mut self, intercept: bool) -> Self {
        self.0.fit_intercept = intercept;
        self
    }

    /// Reject ill-conditioned training data.
    ///
    /// The gram matrix of the normal equations is factorized with a pivoted
    /// LDLᵀ decomposition. By default a rank-deficient or ill-conditioned gram
    /// matrix is accepted and the least-squares-consistent solution of the
    /// decomposition is returned. Setting a limit makes `fit` fail with
    /// [`LinearError::IllConditioned`] when the ratio of the largest to the
    /// smallest pivot exceeds it. Vanished pivots count as an infinite ratio.
    ///
    /// The limit has to be finite and at least `1`.
    pub fn max_condition(mut self, limit: Option<F>) -> Self {
        self.0.max_condition = limit;
        self
    }
}

impl<F: Float> ParamGuard for LinearRegression<F> {
    type Checked = LinearRegressionValidParams<F>;
    type Error = LinearError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        match self.0.max_condition {
            Some(limit) if !limit.is_finite() || limit < F::one() => {
                Err(LinearError::InvalidParams(format!(
                    "max_condition should be finite and at least 1, but is {}",
                    limit
                )))
            }
            _ => Ok(&self.0),
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}
