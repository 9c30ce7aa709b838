use ndarray::{Dimension, ErrorKind, Ix1, Ix2, Ix3, ShapeError};

use super::{Array, Element, Result};

/// Implemented by values that [`array()`] can convert into an array without
/// a shape check.
///
/// Fixed-size nested arrays give their shape through their type. Existing
/// arrays are taken over without copying.
pub trait ArrayLike {
    /// The element type.
    type Elem;

    /// The dimension type.
    type Dim: Dimension;

    fn into_ndarray(self) -> ndarray::Array<Self::Elem, Self::Dim>;
}

impl<A: Element, const N: usize> ArrayLike for [A; N] {
    type Elem = A;
    type Dim = Ix1;
    fn into_ndarray(self) -> ndarray::Array1<A> { ndarray::Array1::from(Vec::from(self)) }
}

impl<A: Element, const N: usize, const M: usize> ArrayLike for [[A; N]; M] {
    type Elem = A;
    type Dim = Ix2;
    fn into_ndarray(self) -> ndarray::Array2<A> { ndarray::Array2::from(Vec::from(self)) }
}

impl<A: Element, const N: usize, const M: usize, const L: usize> ArrayLike for [[[A; N]; M]; L] {
    type Elem = A;
    type Dim = Ix3;
    fn into_ndarray(self) -> ndarray::Array3<A> { ndarray::Array3::from(Vec::from(self)) }
}

impl<A: Element> ArrayLike for Vec<A> {
    type Elem = A;
    type Dim = Ix1;
    fn into_ndarray(self) -> ndarray::Array1<A> { ndarray::Array1::from(self) }
}

impl<A: Element> ArrayLike for &[A] {
    type Elem = A;
    type Dim = Ix1;
    fn into_ndarray(self) -> ndarray::Array1<A> { ndarray::Array1::from(self.to_vec()) }
}

impl<A, D: Dimension> ArrayLike for ndarray::Array<A, D> {
    type Elem = A;
    type Dim = D;
    fn into_ndarray(self) -> ndarray::Array<A, D> { self }
}

impl<A, D: Dimension> ArrayLike for Array<A, D> {
    type Elem = A;
    type Dim = D;
    fn into_ndarray(self) -> ndarray::Array<A, D> { self.into_inner() }
}

/// Constructs an augmented array from array-like `data`.
///
/// The result has the same elements, shape and element type as the `ndarray`
/// array built from `data`.
///
/// ```
/// use numshim::array;
/// let a = array([[1, 2, 3], [4, 5, 6]]);
/// assert_eq!(a.shape(), [2, 3]);
/// assert_eq!(a, numshim::arr2(&[[1, 2, 3], [4, 5, 6]]));
/// ```
pub fn array<T: ArrayLike>(data: T) -> Array<T::Elem, T::Dim> {
    Array::from(data.into_ndarray())
}

// ----------------------------------------------------------------------------

/// Implemented by nested `Vec`s, whose shape is only known at run time.
pub trait TryArrayLike {
    type Elem;
    type Dim: Dimension;

    /// Fails with a [`ShapeError`] if the nesting is ragged.
    fn try_into_ndarray(self) -> std::result::Result<ndarray::Array<Self::Elem, Self::Dim>, ShapeError>;
}

fn ragged() -> ShapeError { ShapeError::from_kind(ErrorKind::IncompatibleShape) }

/// Returns the common length of `rows`, or `None` if they differ.
fn common_len<T>(rows: &[Vec<T>]) -> Option<usize> {
    let len = rows.first().map_or(0, Vec::len);
    rows.iter().all(|row| row.len() == len).then_some(len)
}

impl<A: Element> TryArrayLike for Vec<Vec<A>> {
    type Elem = A;
    type Dim = Ix2;

    fn try_into_ndarray(self) -> std::result::Result<ndarray::Array2<A>, ShapeError> {
        let n = common_len(&self).ok_or_else(ragged)?;
        let m = self.len();
        ndarray::Array2::from_shape_vec((m, n), self.into_iter().flatten().collect())
    }
}

impl<A: Element> TryArrayLike for Vec<Vec<Vec<A>>> {
    type Elem = A;
    type Dim = Ix3;

    fn try_into_ndarray(self) -> std::result::Result<ndarray::Array3<A>, ShapeError> {
        let m = common_len(&self).ok_or_else(ragged)?;
        let mut n = None;
        for plane in &self {
            let len = common_len(plane).ok_or_else(ragged)?;
            if m > 0 && *n.get_or_insert(len) != len { return Err(ragged()); }
        }
        let l = self.len();
        let elements = self.into_iter().flatten().flatten().collect();
        ndarray::Array3::from_shape_vec((l, m, n.unwrap_or(0)), elements)
    }
}

/// Constructs an augmented array from nested `Vec`s.
///
/// Fails with [`Error::Shape`] if the rows have different lengths.
///
/// ```
/// use numshim::try_array;
/// let a = try_array(vec![vec![1, 2], vec![3, 4]]).unwrap();
/// assert_eq!(a, numshim::arr2(&[[1, 2], [3, 4]]));
/// assert!(try_array(vec![vec![1, 2], vec![3]]).is_err());
/// ```
///
/// [`Error::Shape`]: super::Error::Shape
pub fn try_array<T: TryArrayLike>(data: T) -> Result<Array<T::Elem, T::Dim>> {
    Ok(Array::from(data.try_into_ndarray()?))
}

// ----------------------------------------------------------------------------
