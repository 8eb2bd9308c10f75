//! Storage backend implementations.

mod memory;
mod redb;

pub use memory::{MemoryBackend, MemoryBackendConfig};
pub use redb::{RedbBackend, RedbBackendConfig};
