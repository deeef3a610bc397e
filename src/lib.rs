//! `lstsq` provides the shared building blocks of a closed-form linear regression toolkit.
//!
//! ## The Big Picture
//!
//! The workspace is split in the same way most classical ML toolkits are:
//! - this crate holds the dataset abstraction, the tabular ingestion of row collections into
//!   matrices, the training/prediction traits and common regression metrics,
//! - [`lstsq-linear`](../lstsq_linear/index.html) implements ordinary least squares by solving
//!   the normal equations,
//! - `lstsq-datasets` reads delimited text files and generates synthetic linear data.
//!
//! ## Ingesting rows
//!
//! Training data usually arrives as a collection of rows. A [`Dataset`] can be built from
//! borrowed rows (the caller keeps them) or from owned rows (the rows are moved into the
//! matrices). Both produce the same numbers:
//!
//! ```
//! use lstsq::Dataset;
//!
//! let x = vec![vec![1., 2.], vec![3., 4.], vec![5., 6.]];
//! let y = vec![vec![1.], vec![2.], vec![3.]];
//!
//! let copied = Dataset::from_rows(&x, &y).unwrap();
//! let moved = Dataset::from_owned_rows(x, y).unwrap();
//!
//! assert_eq!(copied.records(), moved.records());
//! assert_eq!(copied.nfeatures(), 2);
//! ```

pub mod dataset;
pub mod error;
mod metrics_regression;
pub mod param_guard;
pub mod prelude;
pub mod traits;

pub use dataset::{Dataset, DatasetBase, DatasetView, Float};
pub use error::{Error, Result, ShapeError};
pub use param_guard::ParamGuard;

/// Common metrics functions for regression
pub mod metrics {
    pub use crate::metrics_regression::Regression;
}
