use ndarray::ShapeError;
use thiserror::Error;

/// Errors reported when building an array or applying an indexed update.
///
/// Nothing is checked when a key is supplied to [`At::idx()`]; every variant
/// except [`Error::Shape`] is produced when the update is applied.
///
/// [`At::idx()`]: super::At::idx()
#[derive(Debug, Error)]
pub enum Error {
    /// An integer index lies outside `-len..len` on its axis.
    #[error("index {index} is out of bounds for axis {axis} with size {len}")]
    IndexOutOfBounds {
        index: isize,
        axis: usize,
        len: usize,
    },

    /// The key addresses more axes than the array has.
    #[error("too many indices for array: array is {ndim}-dimensional, but {got} were indexed")]
    TooManyIndices {
        got: usize,
        ndim: usize,
    },

    /// A range with a step of zero.
    #[error("slice step cannot be zero")]
    ZeroStep,

    /// A boolean mask whose shape differs from the array's.
    #[error("boolean mask of shape {mask:?} does not match array of shape {array:?}")]
    MaskShape {
        mask: Vec<usize>,
        array: Vec<usize>,
    },

    /// The update value cannot be broadcast to the selected elements.
    #[error("could not broadcast value of shape {from:?} into selection of shape {to:?}")]
    Broadcast {
        from: Vec<usize>,
        to: Vec<usize>,
    },

    /// Passed through from `ndarray`, e.g. for ragged input data.
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

pub type Result<T> = std::result::Result<T, Error>;
