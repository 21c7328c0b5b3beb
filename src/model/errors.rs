//! Model metadata error types

use thiserror::Error;

/// Result type for registry lookups
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while resolving model metadata
#[derive(Debug, Clone, Error)]
pub enum ModelError {
    /// The name does not match any registered model
    #[error("unknown model: {0}")]
    UnknownModel(String),

    /// The model exists but does not declare the named relation field
    #[error("unknown relation {relation} on model {model}")]
    UnknownRelation {
        /// Model name
        model: String,
        /// Relation field name
        relation: String,
    },
}
