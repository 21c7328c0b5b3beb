//! Dependency sorter error types

use thiserror::Error;

/// Result type for dependency sorting
pub type SortResult<T> = Result<T, SortError>;

/// Errors raised while ordering records by model dependencies
#[derive(Debug, Clone, Error)]
pub enum SortError {
    /// The dependency graph over the models present in the input has a
    /// cycle; no valid ordering exists. Model names are sorted for
    /// deterministic reporting.
    #[error("circular dependency among models: {}", .models.join(", "))]
    CircularDependency {
        /// The models that could not be ordered
        models: Vec<String>,
    },
}
