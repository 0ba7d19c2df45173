use thiserror::Error;

/// Returned by the checked accessors of [`Table`] when the requested
/// position does not hold a record.
///
/// [`Table`]: crate::Table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("index {index} out of bounds for table of length {len}")]
pub struct IndexError {
    /// The requested position.
    pub index: usize,
    /// The length of the table at the time of the access.
    pub len: usize,
}
