//! Store error types
//!
//! Execution failures propagate unmodified to the caller; datapump performs
//! no retry and no suppression.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by a backing store while executing a query
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The query named a model the store does not hold
    #[error("unknown model: {0}")]
    UnknownModel(String),

    /// A predicate or sort referenced a column the model does not carry
    #[error("unknown column {column} on model {model}")]
    UnknownColumn {
        /// Model name
        model: String,
        /// Column name
        column: String,
    },

    /// Backend-specific failure (connectivity, malformed filter)
    #[error("store execution failed: {0}")]
    Execution(String),
}
