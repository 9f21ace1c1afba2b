//! Errors reported by [`Deq`](crate::Deq) operations.

use crate::deq::End;

/// The error type for checked [`Deq`](crate::Deq) accessors.
///
/// An empty deque or a missing value is not an error; those cases return
/// [`None`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum DeqError {
    /// An index was not less than the length of the deque.
    #[error("index (is {index}) should be < len (is {len}) counting from the {end}")]
    IndexOutOfRange {
        /// The end the index was counted from.
        end: End,
        /// The requested index.
        index: usize,
        /// The length of the deque at the time of the call.
        len: usize,
    },
}
