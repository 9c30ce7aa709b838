//! A drop-in numeric namespace whose arrays support the chained indexed-update
//! idiom `a.at().idx(key).set(value)`, built on [`ndarray`].
//!
//! Array code is often written against an API where arrays are updated
//! through `.at[key].set(value)` and `.at[key].add(value)`. This crate lets
//! such code run against `ndarray` without branching on which library is in
//! use.
//!
//! [`ArrayBase<S, D>`] wraps [`ndarray::ArrayBase<S, D>`] and adds the
//! accessor [`ArrayBase::at()`]. Subscribing the accessor with [`At::idx()`]
//! gives an [`AtOp`], whose terminal operations ([`AtOp::set()`],
//! [`AtOp::add()`], ...) update the array in place. Every array that this
//! crate derives from an augmented array (views, slices, arithmetic results,
//! ...) is again augmented.
//!
//! ```
//! use numshim::{array, s};
//!
//! let mut a = array([1, 2, 3, 4]);
//! a.at().idx(1).set(10).unwrap();
//! a.at().idx(2).add(5).unwrap();
//! assert_eq!(a, numshim::arr1(&[1, 10, 8, 4]));
//!
//! let mut b = array([[1, 2], [3, 4]]);
//! b.at().idx(s![.., 0]).add(100).unwrap();
//! assert_eq!(b, numshim::arr2(&[[101, 2], [103, 4]]));
//! ```
//!
//! Updates happen in place, and the updated array is the one `at()` was called
//! on. A purely functional `.at` would return a new array instead and leave the
//! original alone; code that keeps the original around and expects it to be
//! unchanged must `clone()` it first.
//!
//! Every other public name of `ndarray` ([`Axis`], [`s!`], [`arr2()`],
//! [`Zip`], ...) is re-exported unchanged. The names defined here (`ArrayBase`,
//! `Array`, `ArrayView`, ..., `array`) take precedence over `ndarray`'s.

pub use ndarray::*;

mod error;
pub use error::{Error, Result};

pub mod ops;
pub use ops::{Update};

mod operand;
pub use operand::{Element, Operand};

mod key;
pub use key::{Key};

mod at;
pub use at::{At, AtOp};

mod array;
pub use array::{
    ArrayBase, Array, ArcArray, ArrayView, ArrayViewMut,
    Array0, Array1, Array2, Array3, Array4, Array5, Array6, ArrayD,
    ArrayView0, ArrayView1, ArrayView2, ArrayView3, ArrayView4, ArrayView5, ArrayView6, ArrayViewD,
    ArrayViewMut0, ArrayViewMut1, ArrayViewMut2, ArrayViewMut3, ArrayViewMut4, ArrayViewMut5,
    ArrayViewMut6, ArrayViewMutD,
};

mod new;
pub use new::{ArrayLike, TryArrayLike, array, try_array};
