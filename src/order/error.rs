use thiserror::Error;

/// Misuse of the reconciler by its caller. Not recoverable by the user.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderError {
    /// `from` or `to` does not address an element of the collection
    #[error("Index {index} is out of range for a collection of {len} items")]
    IndexOutOfRange { index: usize, len: usize },
    /// The collection has more items than the position space can number
    #[error("Collection of {len} items cannot be numbered with 32-bit positions")]
    CollectionTooLarge { len: usize },
}
