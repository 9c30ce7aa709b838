//! Generic programming over element-wise updates.
//!
//! For each update that [`AtOp`] can apply, this module contains a type that
//! cannot be instantiated and that implements [`Update`]. For example,
//! [`Add`] corresponds to `AtOp::add()`. These can be passed as a type
//! parameter to [`AtOp::update()`].
//!
//! The module also implements the [`std::ops`] arithmetic operators for
//! [`ArrayBase`], so that arithmetic results are themselves augmented arrays.
//!
//! [`AtOp`]: super::AtOp
//! [`AtOp::update()`]: super::AtOp::update()

use ndarray::{Data, DataMut, DimMax, Dimension, ScalarOperand};

use super::{Array, ArrayBase};

/// Combines the current element `dst` with an update value `src`, in place.
///
/// This trait has no methods that take `self`. It makes sense to implement it
/// for types that cannot be instantiated, such as empty enumerations.
pub trait Update<A> {
    fn call(dst: &mut A, src: A);
}

// ----------------------------------------------------------------------------

/// Overwrites the element.
pub enum Set {}

impl<A> Update<A> for Set {
    #[inline(always)]
    fn call(dst: &mut A, src: A) { *dst = src; }
}

// ----------------------------------------------------------------------------

pub enum Add {}

impl<A> Update<A> for Add where A: Clone + std::ops::Add<Output=A> {
    #[inline(always)]
    fn call(dst: &mut A, src: A) { *dst = dst.clone() + src; }
}

// ----------------------------------------------------------------------------

pub enum Mul {}

impl<A> Update<A> for Mul where A: Clone + std::ops::Mul<Output=A> {
    #[inline(always)]
    fn call(dst: &mut A, src: A) { *dst = dst.clone() * src; }
}

// ----------------------------------------------------------------------------

pub enum Div {}

impl<A> Update<A> for Div where A: Clone + std::ops::Div<Output=A> {
    #[inline(always)]
    fn call(dst: &mut A, src: A) { *dst = dst.clone() / src; }
}

// ----------------------------------------------------------------------------

/// Keeps the smaller of the two. An unordered `src` (i.e. NaN) wins.
pub enum Min {}

impl<A: PartialOrd> Update<A> for Min {
    #[inline(always)]
    fn call(dst: &mut A, src: A) {
        if src < *dst || src.partial_cmp(&src).is_none() { *dst = src; }
    }
}

// ----------------------------------------------------------------------------

/// Keeps the larger of the two. An unordered `src` (i.e. NaN) wins.
pub enum Max {}

impl<A: PartialOrd> Update<A> for Max {
    #[inline(always)]
    fn call(dst: &mut A, src: A) {
        if src > *dst || src.partial_cmp(&src).is_none() { *dst = src; }
    }
}

// ----------------------------------------------------------------------------

/// Implement one of the [`std::ops`] arithmetic traits and its compound
/// assignment partner for [`ArrayBase`], by delegating to `ndarray`.
///
/// Three forms are generated:
/// - `&a op &b` where both are augmented arrays, with `ndarray`'s
///   co-broadcasting.
/// - `&a op x` where `x` is a scalar.
/// - `a op= &b` and `a op= x`, in place.
macro_rules! impl_op_for_array {
    ($op:ident { $method:ident } $op_assign:ident { $method_assign:ident }) => {
        impl<'a, A, B, S, S2, D, E> std::ops::$op<&'a ArrayBase<S2, E>> for &'a ArrayBase<S, D> where
            A: Clone + std::ops::$op<B, Output=A>,
            B: Clone,
            S: Data<Elem=A>,
            S2: Data<Elem=B>,
            D: Dimension + DimMax<E>,
            E: Dimension,
        {
            type Output = Array<A, <D as DimMax<E>>::Output>;
            fn $method(self, other: &'a ArrayBase<S2, E>) -> Self::Output {
                ArrayBase::from(std::ops::$op::$method(self.as_ndarray(), other.as_ndarray()))
            }
        }

        impl<'a, A, S, D, B> std::ops::$op<B> for &'a ArrayBase<S, D> where
            A: Clone + std::ops::$op<B, Output=A>,
            S: Data<Elem=A>,
            D: Dimension,
            B: ScalarOperand,
        {
            type Output = Array<A, D>;
            fn $method(self, other: B) -> Self::Output {
                ArrayBase::from(self.as_ndarray().mapv(|x| std::ops::$op::$method(x, other.clone())))
            }
        }

        impl<'a, A, S, S2, D, E> std::ops::$op_assign<&'a ArrayBase<S2, E>> for ArrayBase<S, D> where
            A: Clone + std::ops::$op_assign<A>,
            S: DataMut<Elem=A>,
            S2: Data<Elem=A>,
            D: Dimension,
            E: Dimension,
        {
            fn $method_assign(&mut self, other: &'a ArrayBase<S2, E>) {
                self.as_ndarray_mut().zip_mut_with(other.as_ndarray(), |x, y| {
                    std::ops::$op_assign::$method_assign(x, y.clone());
                });
            }
        }

        impl<A, S, D> std::ops::$op_assign<A> for ArrayBase<S, D> where
            A: ScalarOperand + std::ops::$op_assign<A>,
            S: DataMut<Elem=A>,
            D: Dimension,
        {
            fn $method_assign(&mut self, other: A) {
                self.as_ndarray_mut().map_inplace(|x| {
                    std::ops::$op_assign::$method_assign(x, other.clone());
                });
            }
        }
    };
}

impl_op_for_array! { Add { add } AddAssign { add_assign } }
impl_op_for_array! { Sub { sub } SubAssign { sub_assign } }
impl_op_for_array! { Mul { mul } MulAssign { mul_assign } }
impl_op_for_array! { Div { div } DivAssign { div_assign } }
impl_op_for_array! { Rem { rem } RemAssign { rem_assign } }

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn apply<U: Update<f64>>(dst: f64, src: f64) -> f64 {
        let mut dst = dst;
        U::call(&mut dst, src);
        dst
    }

    #[test]
    fn updates() {
        assert_eq!(apply::<Set>(1.0, 5.0), 5.0);
        assert_eq!(apply::<Add>(1.0, 5.0), 6.0);
        assert_eq!(apply::<Mul>(2.0, 5.0), 10.0);
        assert_eq!(apply::<Div>(10.0, 4.0), 2.5);
        assert_eq!(apply::<Min>(1.0, 5.0), 1.0);
        assert_eq!(apply::<Min>(7.0, 5.0), 5.0);
        assert_eq!(apply::<Max>(1.0, 5.0), 5.0);
        assert_eq!(apply::<Max>(7.0, 5.0), 7.0);
    }

    #[test]
    fn nan_propagates() {
        assert!(apply::<Min>(1.0, f64::NAN).is_nan());
        assert!(apply::<Max>(f64::NAN, 1.0).is_nan());
    }

    #[test]
    fn arithmetic_stays_augmented() {
        let a = crate::array([[1, 2], [3, 4]]);
        let b = crate::array([10, 20]);
        let mut c = &a + &b;
        assert_eq!(c, ndarray::arr2(&[[11, 22], [13, 24]]));
        c.at().idx(0).set(0).unwrap();
        assert_eq!(c, ndarray::arr2(&[[0, 0], [13, 24]]));
        assert_eq!(&a * 2, ndarray::arr2(&[[2, 4], [6, 8]]));
    }

    #[test]
    fn compound_assignment() {
        let mut a = crate::array([1, 2, 3]);
        a += &crate::array([1, 1, 1]);
        a *= 10;
        assert_eq!(a, ndarray::arr1(&[20, 30, 40]));
    }
}
