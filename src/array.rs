use std::fmt;
use std::ops::{Deref, DerefMut};

use ndarray::{
    Axis, Data, DataMut, DataOwned, Dimension, IntoDimension, Ix0, Ix1, Ix2, Ix3, Ix4, Ix5,
    Ix6, IxDyn, OwnedArcRepr, OwnedRepr, RawData, RawDataClone, RemoveAxis, ShapeArg,
    ShapeBuilder, SliceArg, StrideShape, ViewRepr,
};
use num_traits::{FromPrimitive, One, Zero};

use super::{At, Result};

/// An `ndarray` array augmented with the [`at()`] indexed-update accessor.
///
/// `ArrayBase<S, D>` holds exactly one [`ndarray::ArrayBase<S, D>`] and
/// dereferences to it, so every read-only method of `ndarray` (shape, `iter`,
/// `sum`, `[]` indexing, ...) is available unchanged. Methods that derive a
/// new array (views, slices, `map`, arithmetic, ...) are re-implemented here
/// so that the result is again an `ArrayBase`, and therefore also has an
/// `at()`. Use [`From`] to augment any other `ndarray` result.
///
/// The accessor is built from the receiver on every call, so a derived array
/// always updates itself: an owned result updates its own buffer, and a
/// mutable view updates the memory it views.
///
/// ```
/// use numshim::{array, s};
/// let mut a = array([[1, 2], [3, 4]]);
/// a.at().idx(s![.., 0]).add(100).unwrap();
/// assert_eq!(a, numshim::arr2(&[[101, 2], [103, 4]]));
/// ```
///
/// [`at()`]: Self::at()
#[repr(transparent)]
pub struct ArrayBase<S: RawData, D>(ndarray::ArrayBase<S, D>);

/// An owned augmented array.
pub type Array<A, D> = ArrayBase<OwnedRepr<A>, D>;
/// A reference-counted, copy-on-write augmented array.
pub type ArcArray<A, D> = ArrayBase<OwnedArcRepr<A>, D>;
/// A read-only augmented view.
pub type ArrayView<'a, A, D> = ArrayBase<ViewRepr<&'a A>, D>;
/// A read-write augmented view. Its `at()` updates the viewed memory.
pub type ArrayViewMut<'a, A, D> = ArrayBase<ViewRepr<&'a mut A>, D>;

pub type Array0<A> = Array<A, Ix0>;
pub type Array1<A> = Array<A, Ix1>;
pub type Array2<A> = Array<A, Ix2>;
pub type Array3<A> = Array<A, Ix3>;
pub type Array4<A> = Array<A, Ix4>;
pub type Array5<A> = Array<A, Ix5>;
pub type Array6<A> = Array<A, Ix6>;
pub type ArrayD<A> = Array<A, IxDyn>;

pub type ArrayView0<'a, A> = ArrayView<'a, A, Ix0>;
pub type ArrayView1<'a, A> = ArrayView<'a, A, Ix1>;
pub type ArrayView2<'a, A> = ArrayView<'a, A, Ix2>;
pub type ArrayView3<'a, A> = ArrayView<'a, A, Ix3>;
pub type ArrayView4<'a, A> = ArrayView<'a, A, Ix4>;
pub type ArrayView5<'a, A> = ArrayView<'a, A, Ix5>;
pub type ArrayView6<'a, A> = ArrayView<'a, A, Ix6>;
pub type ArrayViewD<'a, A> = ArrayView<'a, A, IxDyn>;

pub type ArrayViewMut0<'a, A> = ArrayViewMut<'a, A, Ix0>;
pub type ArrayViewMut1<'a, A> = ArrayViewMut<'a, A, Ix1>;
pub type ArrayViewMut2<'a, A> = ArrayViewMut<'a, A, Ix2>;
pub type ArrayViewMut3<'a, A> = ArrayViewMut<'a, A, Ix3>;
pub type ArrayViewMut4<'a, A> = ArrayViewMut<'a, A, Ix4>;
pub type ArrayViewMut5<'a, A> = ArrayViewMut<'a, A, Ix5>;
pub type ArrayViewMut6<'a, A> = ArrayViewMut<'a, A, Ix6>;
pub type ArrayViewMutD<'a, A> = ArrayViewMut<'a, A, IxDyn>;

impl<A, S, D> ArrayBase<S, D> where
    S: RawData<Elem=A>,
    D: Dimension,
{
    /// Returns the wrapped `ndarray` array.
    pub fn into_inner(self) -> ndarray::ArrayBase<S, D> { self.0 }

    pub fn as_ndarray(&self) -> &ndarray::ArrayBase<S, D> { &self.0 }

    pub fn as_ndarray_mut(&mut self) -> &mut ndarray::ArrayBase<S, D> { &mut self.0 }

    /// Converts to a dynamic-dimensional array.
    pub fn into_dyn(self) -> ArrayBase<S, IxDyn> { ArrayBase(self.0.into_dyn()) }

    /// Reverses the order of the axes, without moving any elements.
    pub fn reversed_axes(self) -> Self { ArrayBase(self.0.reversed_axes()) }
}

impl<A, S, D> ArrayBase<S, D> where
    S: Data<Elem=A>,
    D: Dimension,
{
    pub fn view(&self) -> ArrayView<'_, A, D> { ArrayBase(self.0.view()) }

    /// Returns a view of the elements selected by `info`, e.g. an [`s!`]
    /// expression.
    ///
    /// # Panics
    ///
    /// Panics in the same cases as [`ndarray::ArrayBase::slice()`].
    ///
    /// [`s!`]: ndarray::s
    pub fn slice<I: SliceArg<D>>(&self, info: I) -> ArrayView<'_, A, I::OutDim> {
        ArrayBase(self.0.slice(info))
    }

    /// The transpose, as a view.
    pub fn t(&self) -> ArrayView<'_, A, D> { ArrayBase(self.0.t()) }

    pub fn index_axis(&self, axis: Axis, index: usize) -> ArrayView<'_, A, D::Smaller> where
        D: RemoveAxis,
    {
        ArrayBase(self.0.index_axis(axis, index))
    }

    pub fn to_owned(&self) -> Array<A, D> where A: Clone { ArrayBase(self.0.to_owned()) }

    pub fn into_owned(self) -> Array<A, D> where A: Clone { ArrayBase(self.0.into_owned()) }

    /// Creates an array that applies `f` to the elements of `self`.
    ///
    /// ```
    /// use numshim::array;
    /// let a = array([1, 2, 3]).map(|x| x * x);
    /// assert_eq!(a, numshim::arr1(&[1, 4, 9]));
    /// ```
    pub fn map<'a, B, F>(&'a self, f: F) -> Array<B, D> where
        F: FnMut(&'a A) -> B,
        A: 'a,
    {
        ArrayBase(self.0.map(f))
    }

    pub fn mapv<B, F>(&self, f: F) -> Array<B, D> where
        F: FnMut(A) -> B,
        A: Clone,
    {
        ArrayBase(self.0.mapv(f))
    }

    /// Returns a view of `self` broadcast to `dim`, or `None` if the shapes
    /// are incompatible.
    pub fn broadcast<E: IntoDimension>(&self, dim: E) -> Option<ArrayView<'_, A, E::Dim>> {
        self.0.broadcast(dim).map(ArrayBase)
    }

    /// Copies the elements at `indices` along `axis`.
    pub fn select(&self, axis: Axis, indices: &[usize]) -> Array<A, D> where
        A: Clone,
        D: RemoveAxis,
    {
        ArrayBase(self.0.select(axis, indices))
    }

    pub fn sum_axis(&self, axis: Axis) -> Array<A, D::Smaller> where
        A: Clone + Zero + std::ops::Add<Output=A>,
        D: RemoveAxis,
    {
        ArrayBase(self.0.sum_axis(axis))
    }

    /// Returns `None` if the axis has length zero.
    pub fn mean_axis(&self, axis: Axis) -> Option<Array<A, D::Smaller>> where
        A: Clone + Zero + FromPrimitive + std::ops::Add<Output=A> + std::ops::Div<Output=A>,
        D: RemoveAxis,
    {
        self.0.mean_axis(axis).map(ArrayBase)
    }

    pub fn insert_axis(self, axis: Axis) -> ArrayBase<S, D::Larger> {
        ArrayBase(self.0.insert_axis(axis))
    }

    pub fn remove_axis(self, axis: Axis) -> ArrayBase<S, D::Smaller> where D: RemoveAxis {
        ArrayBase(self.0.remove_axis(axis))
    }

    /// Reinterprets the elements in a new shape, without copying.
    ///
    /// ```
    /// use numshim::array;
    /// let a = array([1, 2, 3, 4, 5, 6]).into_shape_with_order((2, 3)).unwrap();
    /// assert_eq!(a, numshim::arr2(&[[1, 2, 3], [4, 5, 6]]));
    /// ```
    pub fn into_shape_with_order<E: ShapeArg>(self, shape: E) -> Result<ArrayBase<S, E::Dim>> {
        Ok(ArrayBase(self.0.into_shape_with_order(shape)?))
    }
}

impl<A, S, D> ArrayBase<S, D> where
    S: DataMut<Elem=A>,
    D: Dimension,
{
    /// Returns the indexed-update accessor of this array.
    ///
    /// Updates mutate `self` in place. Code that relied on an indexed update
    /// returning a fresh array, and leaving the original untouched, will
    /// observe the mutation.
    ///
    /// ```
    /// use numshim::array;
    /// let mut a = array([1, 2, 3, 4]);
    /// a.at().idx(1).set(10).unwrap();
    /// a.at().idx(2).add(5).unwrap();
    /// assert_eq!(a, numshim::arr1(&[1, 10, 8, 4]));
    /// ```
    pub fn at(&mut self) -> At<'_, A, D> { At::new(self.0.view_mut()) }

    pub fn view_mut(&mut self) -> ArrayViewMut<'_, A, D> { ArrayBase(self.0.view_mut()) }

    /// Returns a mutable view of the elements selected by `info`.
    ///
    /// ```
    /// use numshim::{array, s};
    /// let mut a = array([1, 2, 3, 4]);
    /// a.slice_mut(s![2..]).at().idx(0).set(0).unwrap();
    /// assert_eq!(a, numshim::arr1(&[1, 2, 0, 4]));
    /// ```
    ///
    /// # Panics
    ///
    /// Panics in the same cases as [`ndarray::ArrayBase::slice_mut()`].
    pub fn slice_mut<I: SliceArg<D>>(&mut self, info: I) -> ArrayViewMut<'_, A, I::OutDim> {
        ArrayBase(self.0.slice_mut(info))
    }

    pub fn index_axis_mut(&mut self, axis: Axis, index: usize) -> ArrayViewMut<'_, A, D::Smaller> where
        D: RemoveAxis,
    {
        ArrayBase(self.0.index_axis_mut(axis, index))
    }
}

impl<A, S, D> ArrayBase<S, D> where
    S: DataOwned<Elem=A>,
    D: Dimension,
{
    pub fn zeros<Sh: ShapeBuilder<Dim=D>>(shape: Sh) -> Self where A: Clone + Zero {
        ArrayBase(ndarray::ArrayBase::zeros(shape))
    }

    pub fn ones<Sh: ShapeBuilder<Dim=D>>(shape: Sh) -> Self where A: Clone + One {
        ArrayBase(ndarray::ArrayBase::ones(shape))
    }

    pub fn from_elem<Sh: ShapeBuilder<Dim=D>>(shape: Sh, elem: A) -> Self where A: Clone {
        ArrayBase(ndarray::ArrayBase::from_elem(shape, elem))
    }

    /// Fails with [`Error::Shape`] if `v` has the wrong length.
    ///
    /// [`Error::Shape`]: super::Error::Shape
    pub fn from_shape_vec<Sh: Into<StrideShape<D>>>(shape: Sh, v: Vec<A>) -> Result<Self> {
        Ok(ArrayBase(ndarray::ArrayBase::from_shape_vec(shape, v)?))
    }

    /// Converts to a reference-counted array, without copying.
    pub fn into_shared(self) -> ArcArray<A, D> where A: Clone { ArrayBase(self.0.into_shared()) }
}

// ----------------------------------------------------------------------------

impl<S: RawData, D> Deref for ArrayBase<S, D> {
    type Target = ndarray::ArrayBase<S, D>;
    fn deref(&self) -> &Self::Target { &self.0 }
}

impl<S: RawData, D> DerefMut for ArrayBase<S, D> {
    fn deref_mut(&mut self) -> &mut Self::Target { &mut self.0 }
}

impl<S: RawData, D> From<ndarray::ArrayBase<S, D>> for ArrayBase<S, D> {
    fn from(inner: ndarray::ArrayBase<S, D>) -> Self { ArrayBase(inner) }
}

impl<S: RawData, D> From<ArrayBase<S, D>> for ndarray::ArrayBase<S, D> {
    fn from(outer: ArrayBase<S, D>) -> Self { outer.0 }
}

impl<S: RawDataClone, D: Clone> Clone for ArrayBase<S, D> {
    fn clone(&self) -> Self { ArrayBase(self.0.clone()) }
}

impl<A, B, S, S2, D> PartialEq<ArrayBase<S2, D>> for ArrayBase<S, D> where
    A: PartialEq<B>,
    S: Data<Elem=A>,
    S2: Data<Elem=B>,
    D: Dimension,
{
    fn eq(&self, other: &ArrayBase<S2, D>) -> bool { self.0 == other.0 }
}

impl<A, B, S, S2, D> PartialEq<ndarray::ArrayBase<S2, D>> for ArrayBase<S, D> where
    A: PartialEq<B>,
    S: Data<Elem=A>,
    S2: Data<Elem=B>,
    D: Dimension,
{
    fn eq(&self, other: &ndarray::ArrayBase<S2, D>) -> bool { self.0 == *other }
}

impl<A, B, S, S2, D> PartialEq<ArrayBase<S2, D>> for ndarray::ArrayBase<S, D> where
    A: PartialEq<B>,
    S: Data<Elem=A>,
    S2: Data<Elem=B>,
    D: Dimension,
{
    fn eq(&self, other: &ArrayBase<S2, D>) -> bool { *self == other.0 }
}

impl<A: Eq, S: Data<Elem=A>, D: Dimension> Eq for ArrayBase<S, D> {}

impl<A: fmt::Debug, S: Data<Elem=A>, D: Dimension> fmt::Debug for ArrayBase<S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { fmt::Debug::fmt(&self.0, f) }
}

impl<A: fmt::Display, S: Data<Elem=A>, D: Dimension> fmt::Display for ArrayBase<S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { fmt::Display::fmt(&self.0, f) }
}

// ----------------------------------------------------------------------------
