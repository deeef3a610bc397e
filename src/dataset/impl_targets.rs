use super::AsTargets;
use ndarray::{ArrayBase, ArrayView2, Axis, Data, Ix1, Ix2};

/// A one-dimensional array is a single target
impl<F, S: Data<Elem = F>> AsTargets for ArrayBase<S, Ix1> {
    type Elem = F;

    fn as_multi_targets(&self) -> ArrayView2<'_, F> {
        self.view().insert_axis(Axis(1))
    }
}

/// A two-dimensional array holds one target per column
impl<F, S: Data<Elem = F>> AsTargets for ArrayBase<S, Ix2> {
    type Elem = F;

    fn as_multi_targets(&self) -> ArrayView2<'_, F> {
        self.view()
    }
}

impl<T: AsTargets> AsTargets for &T {
    type Elem = T::Elem;

    fn as_multi_targets(&self) -> ArrayView2<'_, Self::Elem> {
        (*self).as_multi_targets()
    }
}
