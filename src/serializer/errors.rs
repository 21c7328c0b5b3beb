//! Serializer error types

use thiserror::Error;

use super::format_names;

/// Result type for serialization
pub type SerializeResult<T> = Result<T, SerializeError>;

/// Errors raised while serializing a dump
#[derive(Debug, Error)]
pub enum SerializeError {
    /// The requested format name is not registered
    #[error("unknown serialization format: {0}; expected one of: {}", format_names().join(", "))]
    UnknownFormat(String),

    /// JSON encoding failed
    #[error("serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
