//! Storage backends and typed stores for Wiperhub.
//!
//! Provides:
//! - In-memory and redb implementations of the core `StorageBackend` trait
//! - The telemetry snapshot store (latest sensor reading, last-write-wins)

pub mod backends;
pub mod error;
pub mod telemetry;

pub use backends::{MemoryBackend, RedbBackend, RedbBackendConfig};
pub use error::{Error, Result};
pub use telemetry::{SensorReading, TelemetryStore};
