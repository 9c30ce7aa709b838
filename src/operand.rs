use ndarray::{ArrayBase as NdArrayBase, ArrayD as NdArrayD, ArrayViewD as NdArrayViewD, ArrayViewMutD as NdArrayViewMutD, Data, Dimension};

use super::{ArrayBase, Error, Result, Update};

/// Implemented by the scalar types that can be array elements and update
/// values.
///
/// This is a marker trait. It lets a bare scalar be passed wherever an
/// [`Operand`] is expected, and lets fixed-size arrays of scalars be passed to
/// [`array()`].
///
/// [`array()`]: super::array()
pub trait Element: Clone {}

impl Element for bool {}
impl Element for char {}

impl Element for i8 {}
impl Element for i16 {}
impl Element for i32 {}
impl Element for i64 {}
impl Element for i128 {}
impl Element for isize {}

impl Element for u8 {}
impl Element for u16 {}
impl Element for u32 {}
impl Element for u64 {}
impl Element for u128 {}
impl Element for usize {}

impl Element for f32 {}
impl Element for f64 {}

// ----------------------------------------------------------------------------

/// The value passed to a terminal operation of [`AtOp`].
///
/// An array operand is broadcast against the selected elements; a scalar is
/// applied to each of them.
///
/// [`AtOp`]: super::AtOp
#[derive(Debug, Clone)]
pub enum Operand<'v, A> {
    Scalar(A),
    View(NdArrayViewD<'v, A>),
    Owned(NdArrayD<A>),
}

impl<'v, A: Clone> Operand<'v, A> {
    /// Applies `U` to every element of `target`, pairing each with the
    /// corresponding element of `self`.
    pub(crate) fn apply_to<U: Update<A>>(&self, mut target: NdArrayViewMutD<'_, A>) -> Result<()> {
        let source = match self {
            Operand::Scalar(x) => {
                target.map_inplace(|t| U::call(t, x.clone()));
                return Ok(());
            },
            Operand::View(v) => v.view(),
            Operand::Owned(a) => a.view(),
        };
        let broadcast = source.broadcast(target.raw_dim()).ok_or_else(|| Error::Broadcast {
            from: source.shape().to_vec(),
            to: target.shape().to_vec(),
        })?;
        target.zip_mut_with(&broadcast, |t, x| U::call(t, x.clone()));
        Ok(())
    }
}

impl<'v, A: Element> From<A> for Operand<'v, A> {
    fn from(x: A) -> Self { Operand::Scalar(x) }
}

impl<'v, A, S, D> From<&'v NdArrayBase<S, D>> for Operand<'v, A> where
    S: Data<Elem=A>,
    D: Dimension,
{
    fn from(a: &'v NdArrayBase<S, D>) -> Self { Operand::View(a.view().into_dyn()) }
}

impl<'v, A, S, D> From<&'v ArrayBase<S, D>> for Operand<'v, A> where
    S: Data<Elem=A>,
    D: Dimension,
{
    fn from(a: &'v ArrayBase<S, D>) -> Self { Operand::from(a.as_ndarray()) }
}

impl<'v, A, D: Dimension> From<ndarray::Array<A, D>> for Operand<'v, A> {
    fn from(a: ndarray::Array<A, D>) -> Self { Operand::Owned(a.into_dyn()) }
}

impl<'v, A, D: Dimension> From<super::Array<A, D>> for Operand<'v, A> {
    fn from(a: super::Array<A, D>) -> Self { Operand::Owned(a.into_inner().into_dyn()) }
}

impl<'v, A> From<Vec<A>> for Operand<'v, A> {
    fn from(v: Vec<A>) -> Self { Operand::Owned(ndarray::Array1::from(v).into_dyn()) }
}

impl<'v, A, const N: usize> From<[A; N]> for Operand<'v, A> {
    fn from(v: [A; N]) -> Self { Operand::from(Vec::from(v)) }
}

// ----------------------------------------------------------------------------
