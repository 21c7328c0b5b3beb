//! Dump workflow error types
//!
//! The workflow adds no failure modes of its own; it surfaces whichever
//! stage failed, unmodified.

use thiserror::Error;

use crate::deps::SortError;
use crate::model::ModelError;
use crate::range::RangeError;
use crate::serializer::SerializeError;
use crate::store::StoreError;

/// Result type for dump runs
pub type DumpResult<T> = Result<T, DumpError>;

/// Errors raised by a dump run
#[derive(Debug, Error)]
pub enum DumpError {
    /// Unknown model or relation metadata
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Range traversal failed
    #[error(transparent)]
    Range(#[from] RangeError),

    /// No valid dependency ordering exists
    #[error(transparent)]
    Sort(#[from] SortError),

    /// Output serialization failed or the format is unknown
    #[error(transparent)]
    Serialize(#[from] SerializeError),

    /// The backing store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}
