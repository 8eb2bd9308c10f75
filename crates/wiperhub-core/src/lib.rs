//! Core traits and types for Wiperhub.
//!
//! This crate defines the foundational abstractions shared across the
//! workspace: the unified error type, hub configuration, and the storage
//! backend trait every durable store is built on.

pub mod config;
pub mod error;
pub mod storage;

pub use config::HubConfig;
pub use error::{Error, Result};
pub use storage::{StorageBackend, StorageError};

/// Re-exports commonly used types.
pub mod prelude {
    pub use crate::config::{HubConfig, StorageKind, defaults, env_vars};
    pub use crate::error::{Error, Result};
    pub use crate::storage::{StorageBackend, StorageError};
}
