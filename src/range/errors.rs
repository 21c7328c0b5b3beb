//! Range iterator error types

use thiserror::Error;

use crate::model::ModelError;
use crate::store::StoreError;

/// Result type for range traversal
pub type RangeResult<T> = Result<T, RangeError>;

/// Errors raised by the range iterator
#[derive(Debug, Error)]
pub enum RangeError {
    /// The supplied query already carries ordering or pagination state.
    /// The iterator owns both and cannot compose with a caller-supplied one.
    #[error("query already carries an ordering or a starting offset; the range iterator owns both")]
    InvalidQuerySet,

    /// A zero window size cannot make progress
    #[error("step must be non-zero")]
    ZeroStep,

    /// Metadata resolution failed (unknown model or relation)
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The backing store failed mid-traversal; the sequence ends with this
    /// error rather than silently truncating
    #[error(transparent)]
    Store(#[from] StoreError),
}
