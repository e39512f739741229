//! Core types for the callback registry library
//!
//! Errors are deliberately few: an empty registry and duplicate entries are
//! defined behaviors, not failures.

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors that can occur when building or invoking a registry
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Index {index} out of range for registry of length {len}")]
    OutOfRange { index: usize, len: usize },
}
