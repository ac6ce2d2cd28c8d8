//! Errors reported by the checked entry points of [`Vector`](crate::Vector).

use crate::allocator::AllocError;

/// The recoverable failures of a [`Vector`](crate::Vector) operation.
///
/// Everything else that can go wrong (erasing at the end, popping an empty vector, capacity
/// arithmetic overflowing) is a programming error and panics instead.
///
/// # Examples
///
/// ```
/// use allocvec::prelude::*;
/// use allocvec::VectorError;
///
/// let v: Vector<u8> = vector![1, 2, 3];
/// assert_eq!(v.at(3), Err(VectorError::OutOfRange { index: 3, len: 3 }));
/// assert_eq!(
///     v.at(3).unwrap_err().to_string(),
///     "index 3 is out of range for a vector of length 3",
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum VectorError {
    /// An element index or insertion position lies outside the vector.
    #[error("index {index} is out of range for a vector of length {len}")]
    OutOfRange {
        /// The rejected index or position.
        index: usize,
        /// Length of the vector at the time of the call.
        len: usize,
    },
    /// A requested capacity exceeds [`Vector::max_size`](crate::Vector::max_size).
    #[error("requested capacity {requested} exceeds the maximum of {max} elements")]
    LengthError {
        /// The requested capacity, in elements.
        requested: usize,
        /// The largest capacity this element type supports.
        max: usize,
    },
    /// The allocator strategy could not provide the block.
    #[error(transparent)]
    AllocFailed(#[from] AllocError),
}
