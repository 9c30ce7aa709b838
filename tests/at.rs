use std::any::TypeId;

use approx::assert_abs_diff_eq;
use numshim::{array, s, try_array, Axis, Error, Key};

#[test]
fn set_then_add_one_dimensional() {
    let mut a = array([1, 2, 3, 4]);
    a.at().idx(1).set(10).unwrap();
    assert_eq!(a, ndarray::arr1(&[1, 10, 3, 4]));
    a.at().idx(2).add(5).unwrap();
    assert_eq!(a, ndarray::arr1(&[1, 10, 8, 4]));
}

#[test]
fn add_to_column() {
    let mut a = array([[1, 2], [3, 4]]);
    a.at().idx(s![.., 0]).add(100).unwrap();
    assert_eq!(a, ndarray::arr2(&[[101, 2], [103, 4]]));
}

#[test]
fn set_only_touches_selection() {
    let mut a = array([[0.0; 4]; 3]);
    a.at().idx(s![1.., 1..3]).set([1.0, 2.0]).unwrap();
    assert_eq!(a, ndarray::arr2(&[
        [0.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 2.0, 0.0],
        [0.0, 1.0, 2.0, 0.0],
    ]));
}

#[test]
fn add_matches_old_plus_value() {
    let mut a = array([[1.5, 2.5, 3.5], [4.5, 5.5, 6.5]]);
    let before = a.clone();
    let old = a.at().idx(s![.., 1..]).get().unwrap();
    let value = array([0.25, -0.5]);
    a.at().idx(s![.., 1..]).add(&value).unwrap();
    let new = a.at().idx(s![.., 1..]).get().unwrap();
    assert_abs_diff_eq!(*new.as_ndarray(), old.as_ndarray() + value.as_ndarray(), epsilon = 1e-12);
    assert_eq!(a.column(0), before.column(0));
}

#[test]
fn original_is_mutated() {
    let mut a = array([1, 2, 3]);
    let snapshot = a.clone();
    a.at().idx(0).set(7).unwrap();
    assert_ne!(a, snapshot);
    assert_eq!(a[0], 7);
}

#[test]
fn repeated_subscription_is_independent() {
    let mut a = array([5, 5, 5]);
    let mut b = array([5, 5, 5]);
    let mut at = a.at();
    at.idx(-1).set(0).unwrap();
    at.idx(-1).set(0).unwrap();
    b.at().idx(-1).set(0).unwrap();
    assert_eq!(a, b);
}

#[test]
fn mask_keys() {
    let mut a = array([[1, -2], [-3, 4]]);
    let negative = a.mapv(|x| x < 0);
    a.at().idx(&negative).set(0).unwrap();
    assert_eq!(a, ndarray::arr2(&[[1, 0], [0, 4]]));

    let mut b = array([1, 2, 3]);
    let result = b.at().idx(ndarray::arr1(&[true, false])).set(0);
    assert!(matches!(result, Err(Error::MaskShape {..})));
    assert_eq!(b, ndarray::arr1(&[1, 2, 3]));
}

#[test]
fn take_keys() {
    let mut a = array([[1, 1], [2, 2], [3, 3]]);
    a.at().idx([0, -1]).add(array([[10, 10], [30, 30]])).unwrap();
    assert_eq!(a, ndarray::arr2(&[[11, 11], [2, 2], [33, 33]]));

    // A repeated index is written once, with the last value.
    let mut b = array([0, 0, 0]);
    b.at().idx(vec![1usize, 1]).add(1).unwrap();
    assert_eq!(b, ndarray::arr1(&[0, 1, 0]));
    b.at().idx([2, 2]).set([8, 9]).unwrap();
    assert_eq!(b, ndarray::arr1(&[0, 1, 9]));
}

#[test]
fn whole_array_and_scalars() {
    let mut a = array([[1, 2], [3, 4]]);
    a.at().idx(()).multiply(2).unwrap();
    assert_eq!(a, ndarray::arr2(&[[2, 4], [6, 8]]));

    let mut z = numshim::Array0::from_elem((), 1.0);
    z.at().idx(()).add(0.5).unwrap();
    assert_eq!(z[()], 1.5);
}

#[test]
fn errors_leave_array_unchanged() {
    let mut a = array([[1, 2], [3, 4]]);
    assert!(matches!(
        a.at().idx((2, 0)).set(0),
        Err(Error::IndexOutOfBounds {index: 2, axis: 0, len: 2}),
    ));
    assert!(matches!(
        a.at().idx(s![.., .., ..]).set(0),
        Err(Error::TooManyIndices {got: 3, ndim: 2}),
    ));
    assert!(matches!(
        a.at().idx(0).set([1, 2, 3]),
        Err(Error::Broadcast {..}),
    ));
    assert!(matches!(
        a.at().idx([5]).add(1),
        Err(Error::IndexOutOfBounds {index: 5, axis: 0, len: 2}),
    ));
    assert_eq!(a, ndarray::arr2(&[[1, 2], [3, 4]]));
}

#[test]
fn huge_unsigned_index_is_out_of_bounds() {
    let mut a = array([1, 2, 3]);
    assert!(matches!(
        a.at().idx(vec![usize::MAX]).set(0),
        Err(Error::IndexOutOfBounds {index: isize::MAX, axis: 0, len: 3}),
    ));
    assert!(matches!(
        a.at().idx(usize::MAX).set(0),
        Err(Error::IndexOutOfBounds {index: isize::MAX, axis: 0, len: 3}),
    ));
    assert_eq!(a, ndarray::arr1(&[1, 2, 3]));
}

#[test]
fn empty_selections_change_nothing() {
    let mut a = array([1, 2, 3, 4]);
    a.at().idx(3..1).set(0).unwrap();
    a.at().idx(Vec::<usize>::new()).set(0).unwrap();
    a.at().idx(s![10..]).add(1).unwrap();
    assert_eq!(a, ndarray::arr1(&[1, 2, 3, 4]));
    assert_eq!(a.at().idx(3..1).get().unwrap().len(), 0);

    let mut z = numshim::Array1::<i32>::zeros(0);
    z.at().idx(..).add(1).unwrap();
    z.at().idx(Vec::<isize>::new()).set(5).unwrap();
    assert_eq!(z.len(), 0);
}

#[test]
fn derived_arrays_update_themselves() {
    let mut a = array([[1, 2, 3], [4, 5, 6]]);

    // An owned derivation has its own buffer.
    let mut b = &a * 10;
    b.at().idx((0, 0)).set(0).unwrap();
    assert_eq!(b, ndarray::arr2(&[[0, 20, 30], [40, 50, 60]]));
    assert_eq!(a[[0, 0]], 1);

    let mut c = a.slice(s![1, ..]).to_owned();
    c.at().idx(..).set(0).unwrap();
    assert_eq!(a.row(1), ndarray::arr1(&[4, 5, 6]));

    // A mutable view shares its parent's buffer.
    let mut v = a.slice_mut(s![.., 2]);
    v.at().idx(1).add(1000).unwrap();
    assert_eq!(v, ndarray::arr1(&[3, 1006]));
    assert_eq!(a, ndarray::arr2(&[[1, 2, 3], [4, 5, 1006]]));

    let mut d = a.view_mut().into_dyn();
    d.at().idx((0, 0)).set(-1).unwrap();
    assert_eq!(a[[0, 0]], -1);
}

#[test]
fn augmenting_ndarray_results() {
    let a = array([[1.0, 2.0], [3.0, 4.0]]);
    let mut s: numshim::Array1<f64> = a.sum_axis(Axis(1));
    s.at().idx(0).divide(3.0).unwrap();
    assert_abs_diff_eq!(s[0], 1.0);

    let mut dot = numshim::Array2::from(a.dot(a.as_ndarray()));
    dot.at().idx(s![0, ..]).set(0.0).unwrap();
    assert_eq!(dot, ndarray::arr2(&[[0.0, 0.0], [15.0, 22.0]]));
}

#[test]
fn construction_matches_ndarray() {
    let a = array([[1u16, 2], [3, 4]]);
    let nd = ndarray::arr2(&[[1u16, 2], [3, 4]]);
    assert_eq!(a.shape(), nd.shape());
    assert_eq!(a, nd);
    assert_eq!(a.into_inner(), nd);

    assert!(matches!(try_array(vec![vec![1], vec![2, 3]]), Err(Error::Shape(_))));
}

#[test]
fn forwarded_names_are_ndarray_items() {
    assert_eq!(TypeId::of::<numshim::Axis>(), TypeId::of::<ndarray::Axis>());
    assert_eq!(TypeId::of::<numshim::Ix2>(), TypeId::of::<ndarray::Ix2>());
    assert_eq!(TypeId::of::<numshim::ShapeError>(), TypeId::of::<ndarray::ShapeError>());
    assert_eq!(TypeId::of::<numshim::SliceInfoElem>(), TypeId::of::<ndarray::SliceInfoElem>());
    let f: fn(&[i32]) -> ndarray::Array1<i32> = numshim::arr1;
    assert_eq!(f(&[1, 2]), ndarray::arr1(&[1, 2]));

    // Local names take precedence.
    assert_ne!(TypeId::of::<numshim::Array1<i32>>(), TypeId::of::<ndarray::Array1<i32>>());
}

#[test]
fn keys_are_inspectable() {
    let mut a = array([1, 2]);
    let mut at = a.at();
    let op = at.idx(1);
    assert_eq!(op.key(), &Key::from(1));
}
