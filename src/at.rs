use ndarray::{ArrayViewMut as NdArrayViewMut, Dimension};
use tracing::{debug, trace};

use super::{ops, ArrayD, Key, Operand, Result, Update};

/// The indexed-update accessor returned by [`ArrayBase::at()`].
///
/// Subscribing it with [`idx()`] returns an [`AtOp`] bound to the same array.
/// It can be subscribed any number of times.
///
/// ```
/// use numshim::array;
/// let mut a = array([0, 0, 0]);
/// let mut at = a.at();
/// at.idx(0).set(1).unwrap();
/// at.idx(2).set(3).unwrap();
/// assert_eq!(a, numshim::arr1(&[1, 0, 3]));
/// ```
///
/// [`ArrayBase::at()`]: super::ArrayBase::at()
/// [`idx()`]: Self::idx()
pub struct At<'a, A, D: Dimension> {
    owner: NdArrayViewMut<'a, A, D>,
}

impl<'a, A, D: Dimension> At<'a, A, D> {
    pub(crate) fn new(owner: NdArrayViewMut<'a, A, D>) -> Self { Self {owner} }

    /// Returns a pending update of the elements selected by `key`.
    ///
    /// `key` is not checked here. See [`Key`] for what can be passed.
    pub fn idx(&mut self, key: impl Into<Key>) -> AtOp<'_, A, D> {
        AtOp {owner: self.owner.view_mut(), key: key.into()}
    }
}

// ----------------------------------------------------------------------------

/// A pending update of some elements of an array, returned by [`At::idx()`].
///
/// Each terminal operation consumes the `AtOp` and mutates the array in
/// place. This is the one behavioural difference from a purely functional
/// `.at[key].set(value)`, which would instead return an updated copy:
///
/// ```
/// use numshim::array;
/// let mut a = array([1.0, 2.0]);
/// let b = a.clone();
/// a.at().idx(0).set(5.0).unwrap();
/// assert_eq!(a, numshim::arr1(&[5.0, 2.0]));
/// assert_eq!(b, numshim::arr1(&[1.0, 2.0]));
/// ```
///
/// The value may be a scalar, or an array that broadcasts to the shape of the
/// selection. On error, the array is left unchanged.
pub struct AtOp<'a, A, D: Dimension> {
    owner: NdArrayViewMut<'a, A, D>,
    key: Key,
}

impl<'a, A: Clone, D: Dimension> AtOp<'a, A, D> {
    /// The selected key.
    pub fn key(&self) -> &Key { &self.key }

    /// Combines each selected element with the corresponding element of
    /// `value` using `U`. The other terminal operations call this.
    pub fn update<'v, U: Update<A>>(self, value: impl Into<Operand<'v, A>>) -> Result<()> where
        A: 'v,
    {
        let value = value.into();
        self.modify(std::any::type_name::<U>(), |selection| value.apply_to::<U>(selection))
    }

    /// Assigns `value` to the selected elements.
    pub fn set<'v>(self, value: impl Into<Operand<'v, A>>) -> Result<()> where A: 'v {
        self.update::<ops::Set>(value)
    }

    /// Adds `value` to the selected elements.
    ///
    /// ```
    /// use numshim::array;
    /// let mut a = array([[1, 2], [3, 4]]);
    /// a.at().idx(1).add([10, 20]).unwrap();
    /// assert_eq!(a, numshim::arr2(&[[1, 2], [13, 24]]));
    /// ```
    pub fn add<'v>(self, value: impl Into<Operand<'v, A>>) -> Result<()> where
        A: 'v + std::ops::Add<Output=A>,
    {
        self.update::<ops::Add>(value)
    }

    pub fn multiply<'v>(self, value: impl Into<Operand<'v, A>>) -> Result<()> where
        A: 'v + std::ops::Mul<Output=A>,
    {
        self.update::<ops::Mul>(value)
    }

    pub fn divide<'v>(self, value: impl Into<Operand<'v, A>>) -> Result<()> where
        A: 'v + std::ops::Div<Output=A>,
    {
        self.update::<ops::Div>(value)
    }

    /// Replaces each selected element with the smaller of it and `value`.
    pub fn min<'v>(self, value: impl Into<Operand<'v, A>>) -> Result<()> where A: 'v + PartialOrd {
        self.update::<ops::Min>(value)
    }

    /// Replaces each selected element with the larger of it and `value`.
    pub fn max<'v>(self, value: impl Into<Operand<'v, A>>) -> Result<()> where A: 'v + PartialOrd {
        self.update::<ops::Max>(value)
    }

    /// Replaces each selected element `x` with `f(x)`.
    ///
    /// ```
    /// use numshim::{array, s};
    /// let mut a = array([1, 2, 3, 4]);
    /// a.at().idx(s![..;2]).apply(|x| -x).unwrap();
    /// assert_eq!(a, numshim::arr1(&[-1, 2, -3, 4]));
    /// ```
    pub fn apply(self, f: impl FnMut(A) -> A) -> Result<()> {
        self.modify("apply", |mut selection| {
            selection.mapv_inplace(f);
            Ok(())
        })
    }

    /// Returns a copy of the selected elements, leaving the array unchanged.
    pub fn get(self) -> Result<ArrayD<A>> {
        let AtOp {owner, key} = self;
        Ok(key.gather(owner.view().into_dyn())?.into())
    }

    fn modify(
        self,
        op: &str,
        f: impl FnOnce(ndarray::ArrayViewMutD<'_, A>) -> Result<()>,
    ) -> Result<()> {
        let AtOp {owner, key} = self;
        trace!(op, ?key, shape = ?owner.shape(), "indexed update");
        key.select(owner.into_dyn(), f).map_err(|e| {
            debug!(op, ?key, error = %e, "indexed update failed");
            e
        })
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use ndarray::{arr1, arr2, s};

    use crate::{array, Error};

    #[test]
    fn subscribing_does_not_validate() {
        let mut a = array([1, 2, 3]);
        let mut at = a.at();
        let op = at.idx(7);
        assert!(matches!(
            op.set(0),
            Err(Error::IndexOutOfBounds {index: 7, axis: 0, len: 3}),
        ));
        assert_eq!(a, arr1(&[1, 2, 3]));
    }

    #[test]
    fn independent_operations() {
        let mut a = array([1, 2, 3]);
        let mut b = a.clone();
        let mut at = a.at();
        at.idx(1).add(5).unwrap();
        at.idx(1).add(5).unwrap();
        b.at().idx(1).add(10).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn get_leaves_array_unchanged() {
        let mut a = array([[1, 2], [3, 4]]);
        let col = a.at().idx(s![.., 1]).get().unwrap();
        assert_eq!(col, arr1(&[2, 4]).into_dyn());
        let picked = a.at().idx(arr2(&[[true, false], [false, true]])).get().unwrap();
        assert_eq!(picked, arr1(&[1, 4]).into_dyn());
        assert_eq!(a, arr2(&[[1, 2], [3, 4]]));
    }

    #[test]
    fn min_max_multiply_divide() {
        let mut a = array([4.0, 8.0, 16.0]);
        a.at().idx(0).min(2.0).unwrap();
        a.at().idx(1).max(2.0).unwrap();
        a.at().idx(2).divide(4.0).unwrap();
        a.at().idx(..).multiply([1.0, 0.5, 2.0]).unwrap();
        assert_eq!(a, arr1(&[2.0, 4.0, 8.0]));
    }
}
