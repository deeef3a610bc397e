//!
//! `lstsq-linear` provides a closed-form ordinary least squares regression.
//!
//! ## The Big Picture
//!
//! `lstsq-linear` is the regression engine of the `lstsq` workspace. It takes a dataset with a
//! feature matrix `X` and one or more targets `Y`, appends a column of ones to `X` so that the
//! bias is solved together with the weights, and solves the normal equations
//!
//! (X'ᵀ X') W' = X'ᵀ Y
//!
//! with a pivoted LDLᵀ decomposition of the gram matrix. No iterative solver is involved, the
//! fit is done in `O(n_samples * n_features²)` for the gram matrix plus `O(n_features³)` for the
//! decomposition.
//!
//! ## Rank deficiency
//!
//! A singular or nearly singular gram matrix is not rejected. The decomposition drops vanishing
//! pivots and returns a solution that is still consistent with the least-squares problem, so
//! predictions on the training data stay exact for exactly linear data even when features are
//! duplicated. Use [`LinearRegression::max_condition`] to fail on such data instead.
//!
//! ## Predictions
//!
//! A fitted model predicts a single sample with
//! [`predict_one`](FittedLinearRegression::predict_one), a batch of rows with
//! [`predict_rows`](FittedLinearRegression::predict_rows) or a feature matrix through the
//! `Predict` trait. Batches are evaluated in parallel, the order of the rows is kept.
//!
//! ## Examples
//!
//! There is an usage example in the `examples/` directory. To run, use:
//!
//! ```bash
//! $ cargo run --example train_csv -- diabetes.csv --targets 1
//! ```

mod error;
mod hyperparams;
mod ldlt;
mod ols;

pub use error::*;
pub use hyperparams::*;
pub use ols::*;
