use std::ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive};

use ndarray::{
    Array1 as NdArray1, ArrayBase as NdArrayBase, ArrayD as NdArrayD,
    ArrayViewD as NdArrayViewD, ArrayViewMutD as NdArrayViewMutD, Axis, Data, Dimension, Slice, SliceInfo, SliceInfoElem,
};

use super::{ArrayBase, Error, Result};

/// Selects the elements that an [`AtOp`] updates.
///
/// `Key`s are usually built implicitly by [`At::idx()`], from:
/// - an integer, a range, or an [`s!`] expression, or a tuple of up to three
///   integers and ranges. Integers select one position and remove the axis;
///   ranges keep it. Negative values count from the end. Range bounds beyond
///   the axis are clamped. Axes left unaddressed are selected whole.
/// - `()`, which selects the whole array.
/// - a boolean array with the same shape as the updated array. It selects the
///   `true` positions in logical order. Unlike NumPy, a mask of lower rank
///   (e.g. a 1-D row mask on a 2-D array) is rejected with
///   [`Error::MaskShape`] rather than selecting whole rows.
/// - a list of integers, which selects (possibly repeated) positions along
///   axis 0.
///
/// A `Key` is not checked until it is applied to an array.
///
/// [`AtOp`]: super::AtOp
/// [`At::idx()`]: super::At::idx()
/// [`s!`]: ndarray::s
/// [`Error::MaskShape`]: super::Error::MaskShape
#[derive(Debug, Clone, PartialEq)]
pub enum Key {
    Slice(Vec<SliceInfoElem>),
    Mask(NdArrayD<bool>),
    Take(Vec<isize>),
}

impl Key {
    /// Returns a copy of the elements of `owner` selected by `self`.
    pub(crate) fn gather<A: Clone>(&self, owner: NdArrayViewD<'_, A>) -> Result<NdArrayD<A>> {
        match self {
            Key::Slice(elems) => {
                let elems = resolve_slice(elems, owner.shape())?;
                Ok(owner.slice_move(elems.as_slice()).to_owned())
            },
            Key::Mask(mask) => {
                check_mask(mask, owner.shape())?;
                let picked: Vec<A> = owner.iter().zip(mask.iter())
                    .filter(|&(_, &m)| m)
                    .map(|(x, _)| x.clone())
                    .collect();
                Ok(NdArray1::from(picked).into_dyn())
            },
            Key::Take(indices) => {
                let rows = resolve_rows(indices, owner.shape())?;
                Ok(owner.select(Axis(0), &rows))
            },
        }
    }

    /// Calls `f` with a mutable view of the elements of `owner` selected by
    /// `self`.
    ///
    /// Slice keys pass `f` a view into `owner`. Mask and take keys pass `f` a
    /// gathered copy, which is then written back in selection order, so the
    /// last of several writes to the same position wins.
    pub(crate) fn select<A: Clone, R>(
        &self,
        mut owner: NdArrayViewMutD<'_, A>,
        f: impl FnOnce(NdArrayViewMutD<'_, A>) -> Result<R>,
    ) -> Result<R> {
        if let Key::Slice(elems) = self {
            let elems = resolve_slice(elems, owner.shape())?;
            return f(owner.slice_move(elems.as_slice()));
        }
        let mut gathered = self.gather(owner.view())?;
        let result = f(gathered.view_mut())?;
        match self {
            Key::Mask(mask) => {
                let targets = owner.iter_mut().zip(mask.iter()).filter(|&(_, &m)| m);
                for ((dst, _), src) in targets.zip(gathered.iter()) { *dst = src.clone(); }
            },
            Key::Take(indices) => {
                let rows = resolve_rows(indices, owner.shape())?;
                for (j, &i) in rows.iter().enumerate() {
                    owner.index_axis_mut(Axis(0), i).assign(&gathered.index_axis(Axis(0), j));
                }
            },
            Key::Slice(_) => {},
        }
        Ok(result)
    }
}

fn check_mask(mask: &NdArrayD<bool>, shape: &[usize]) -> Result<()> {
    if mask.shape() != shape {
        return Err(Error::MaskShape {mask: mask.shape().to_vec(), array: shape.to_vec()});
    }
    Ok(())
}

/// Resolves take `indices` against axis 0 of an array of shape `shape`.
fn resolve_rows(indices: &[isize], shape: &[usize]) -> Result<Vec<usize>> {
    let &len = shape.first().ok_or(Error::TooManyIndices {got: 1, ndim: 0})?;
    indices.iter().map(|&i| resolve_index(i, 0, len)).collect()
}

/// Converts an unsigned index, saturating so that an index too large for
/// `isize` still fails the bounds check.
fn saturate(i: usize) -> isize { isize::try_from(i).unwrap_or(isize::MAX) }

/// Returns the position in `0..len` denoted by `index`, which may be
/// negative.
fn resolve_index(index: isize, axis: usize, len: usize) -> Result<usize> {
    let resolved = if index < 0 { index + len as isize } else { index };
    if resolved < 0 || resolved >= len as isize {
        return Err(Error::IndexOutOfBounds {index, axis, len});
    }
    Ok(resolved as usize)
}

/// Clamps a range bound into `0..=len`, counting negative bounds from the end.
fn clamp_bound(bound: isize, len: usize) -> isize {
    let len = len as isize;
    if bound < 0 { (bound + len).max(0) } else { bound.min(len) }
}

/// Rewrites `elems` so that `ndarray` will accept it for an array of shape
/// `shape`: one element per axis, every bound in range.
fn resolve_slice(elems: &[SliceInfoElem], shape: &[usize]) -> Result<Vec<SliceInfoElem>> {
    let addressed = elems.iter().filter(|e| !matches!(e, SliceInfoElem::NewAxis)).count();
    if addressed > shape.len() {
        return Err(Error::TooManyIndices {got: addressed, ndim: shape.len()});
    }
    let mut axis = 0;
    let mut resolved = Vec::with_capacity(elems.len() + shape.len() - addressed);
    for &elem in elems {
        resolved.push(match elem {
            SliceInfoElem::Index(i) => {
                let index = resolve_index(i, axis, shape[axis])?;
                axis += 1;
                SliceInfoElem::Index(index as isize)
            },
            SliceInfoElem::Slice {start, end, step} => {
                if step == 0 { return Err(Error::ZeroStep); }
                let len = shape[axis];
                axis += 1;
                SliceInfoElem::Slice {
                    start: clamp_bound(start, len),
                    end: Some(clamp_bound(end.unwrap_or(len as isize), len)),
                    step,
                }
            },
            SliceInfoElem::NewAxis => SliceInfoElem::NewAxis,
        });
    }
    resolved.extend((axis..shape.len()).map(|_| SliceInfoElem::from(..)));
    Ok(resolved)
}

// ----------------------------------------------------------------------------

impl From<()> for Key {
    fn from((): ()) -> Self { Key::Slice(Vec::new()) }
}

impl From<SliceInfoElem> for Key {
    fn from(elem: SliceInfoElem) -> Self { Key::Slice(vec![elem]) }
}

/// Implements `From<$t> for Key` for types that `ndarray` converts to a
/// single [`SliceInfoElem`].
macro_rules! impl_from_elem {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Key {
                fn from(x: $t) -> Self { Key::Slice(vec![SliceInfoElem::from(x)]) }
            }
        )*
    };
}

impl_from_elem!(isize, i32, Slice, RangeFull);
impl_from_elem!(Range<usize>, RangeFrom<usize>, RangeTo<usize>, RangeInclusive<usize>, RangeToInclusive<usize>);
impl_from_elem!(Range<isize>, RangeFrom<isize>, RangeTo<isize>, RangeInclusive<isize>, RangeToInclusive<isize>);
impl_from_elem!(Range<i32>, RangeFrom<i32>, RangeTo<i32>, RangeInclusive<i32>, RangeToInclusive<i32>);

impl From<usize> for Key {
    fn from(i: usize) -> Self { Key::Slice(vec![SliceInfoElem::Index(saturate(i))]) }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self { Key::Slice(vec![SliceInfoElem::Index(i as isize)]) }
}

impl<T, Din, Dout> From<SliceInfo<T, Din, Dout>> for Key where
    T: AsRef<[SliceInfoElem]>,
    Din: Dimension,
    Dout: Dimension,
{
    fn from(info: SliceInfo<T, Din, Dout>) -> Self {
        let elems: &[SliceInfoElem] = info.as_ref();
        Key::Slice(elems.to_vec())
    }
}

impl<I0, I1> From<(I0, I1)> for Key where
    I0: Into<SliceInfoElem>,
    I1: Into<SliceInfoElem>,
{
    fn from((i0, i1): (I0, I1)) -> Self { Key::Slice(vec![i0.into(), i1.into()]) }
}

impl<I0, I1, I2> From<(I0, I1, I2)> for Key where
    I0: Into<SliceInfoElem>,
    I1: Into<SliceInfoElem>,
    I2: Into<SliceInfoElem>,
{
    fn from((i0, i1, i2): (I0, I1, I2)) -> Self {
        Key::Slice(vec![i0.into(), i1.into(), i2.into()])
    }
}

// ----------------------------------------------------------------------------

impl<S: Data<Elem=bool>, D: Dimension> From<NdArrayBase<S, D>> for Key {
    fn from(mask: NdArrayBase<S, D>) -> Self { Key::Mask(mask.into_dyn().into_owned()) }
}

impl<S: Data<Elem=bool>, D: Dimension> From<&NdArrayBase<S, D>> for Key {
    fn from(mask: &NdArrayBase<S, D>) -> Self { Key::Mask(mask.to_owned().into_dyn()) }
}

impl<S: Data<Elem=bool>, D: Dimension> From<ArrayBase<S, D>> for Key {
    fn from(mask: ArrayBase<S, D>) -> Self { Key::from(mask.into_inner()) }
}

impl<S: Data<Elem=bool>, D: Dimension> From<&ArrayBase<S, D>> for Key {
    fn from(mask: &ArrayBase<S, D>) -> Self { Key::from(mask.as_ndarray()) }
}

/// Implements `From` for lists of integers of type `$t`.
macro_rules! impl_from_indices {
    ($($t:ty => $to_isize:expr),*) => {
        $(
            impl From<Vec<$t>> for Key {
                fn from(indices: Vec<$t>) -> Self { Key::from(indices.as_slice()) }
            }

            impl From<&[$t]> for Key {
                fn from(indices: &[$t]) -> Self {
                    Key::Take(indices.iter().map(|&i| $to_isize(i)).collect())
                }
            }

            impl<const N: usize> From<[$t; N]> for Key {
                fn from(indices: [$t; N]) -> Self { Key::from(&indices[..]) }
            }
        )*
    };
}

impl_from_indices!(
    usize => saturate,
    isize => |i: isize| i,
    i32 => |i: i32| i as isize,
    i64 => |i: i64| i as isize
);

// ----------------------------------------------------------------------------
