//! Unified error handling for Wiperhub.
//!
//! This module provides a common error type that can be used across all
//! crates, reducing boilerplate and making error handling consistent.

/// Unified error type for Wiperhub.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Dispatch errors (command creation failed).
    #[error("Dispatch error: {0}")]
    Dispatch(String),

    /// Storage/database errors.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization errors.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Not found errors.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflicting state transition.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Generic internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type using the unified error.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Machine-readable error kind, stable across message changes.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Config(_) => "config",
            Error::Validation(_) => "validation",
            Error::Dispatch(_) => "dispatch",
            Error::Storage(_) => "storage",
            Error::Serialization(_) => "serialization",
            Error::NotFound(_) => "not_found",
            Error::Conflict(_) => "conflict",
            Error::Internal(_) => "internal",
        }
    }
}

impl From<crate::storage::StorageError> for Error {
    fn from(e: crate::storage::StorageError) -> Self {
        match e {
            crate::storage::StorageError::Serialization(s) => Error::Serialization(s),
            other => Error::Storage(other.to_string()),
        }
    }
}
