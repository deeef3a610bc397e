//! Validation of hyper-parameters before fitting
use std::error::Error;

use crate::{
    dataset::{DatasetBase, Records},
    traits::Fit,
};

/// Hyper-parameters that are validated before use
///
/// The builder type collects settings without checking them. `check` turns it into the checked
/// parameter type, which is the one carrying the actual `Fit` implementation. Fitting on the
/// unchecked builder runs the check first, so an invalid setting surfaces as error of `fit`
/// without touching the data.
pub trait ParamGuard {
    /// Parameters that passed validation
    type Checked;
    type Error: Error;

    /// Validate and borrow the checked parameters
    fn check_ref(&self) -> Result<&Self::Checked, Self::Error>;

    /// Validate and return the checked parameters, has to agree with `check_ref`
    fn check(self) -> Result<Self::Checked, Self::Error>;
}

/// Fitting unchecked parameters validates them and forwards to the checked parameters
impl<R: Records, T, E, P: ParamGuard> Fit<R, T, E> for P
where
    P::Checked: Fit<R, T, E>,
    E: Error + From<crate::error::Error> + From<P::Error>,
{
    type Object = <P::Checked as Fit<R, T, E>>::Object;

    fn fit(&self, dataset: &DatasetBase<R, T>) -> Result<Self::Object, E> {
        self.check_ref()?.fit(dataset)
    }
}
