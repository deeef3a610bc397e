use super::{AsTargets, DatasetBase, DatasetView, Records};
use ndarray::{ArrayBase, ArrayView2, Data, Ix2};

/// Implementation without constraints on records and targets
///
/// This implementation block provides methods for the creation of datasets and
/// accessing the records and targets. No validation happens here, use
/// [`Dataset::from_rows`](crate::Dataset::from_rows) to build a checked dataset from rows.
impl<R: Records, T> DatasetBase<R, T> {
    /// Create a new dataset from records and targets
    pub fn new(records: R, targets: T) -> DatasetBase<R, T> {
        DatasetBase { records, targets }
    }

    /// Returns reference to records
    pub fn records(&self) -> &R {
        &self.records
    }

    /// Returns reference to targets
    pub fn targets(&self) -> &T {
        &self.targets
    }

    pub fn nsamples(&self) -> usize {
        self.records.nsamples()
    }

    pub fn nfeatures(&self) -> usize {
        self.records.nfeatures()
    }
}

impl<R: Records, T: AsTargets> DatasetBase<R, T> {
    /// Targets as a two-dimensional view with shape (nsamples, ntargets)
    pub fn as_multi_targets(&self) -> ArrayView2<'_, T::Elem> {
        self.targets.as_multi_targets()
    }

    pub fn ntargets(&self) -> usize {
        self.targets.ntargets()
    }
}

impl<F, S: Data<Elem = F>, T: AsTargets<Elem = F>> DatasetBase<ArrayBase<S, Ix2>, T> {
    /// Creates a view of the dataset
    pub fn view(&self) -> DatasetView<'_, F> {
        DatasetBase::new(self.records.view(), self.targets.as_multi_targets())
    }
}
