//! Telemetry snapshot store.
//!
//! The hub keeps exactly one sensor reading: the latest one. The DHT-attached
//! master overwrites it on every ingest; the UI reads it on demand. History
//! is an external concern and never retained here.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wiperhub_core::storage::StorageBackend;

use crate::error::{Error, Result};

/// Storage table holding the snapshot.
const TELEMETRY_TABLE: &str = "telemetry";
/// Single slot key, overwritten on every ingest.
const LATEST_KEY: &str = "latest";

/// Last-known sensor reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// When the reading was taken.
    pub timestamp: DateTime<Utc>,
}

impl SensorReading {
    /// Create a reading stamped now.
    pub fn new(temperature: f64, humidity: f64) -> Self {
        Self {
            temperature,
            humidity,
            timestamp: Utc::now(),
        }
    }
}

/// Latest-reading store over a storage backend.
///
/// Last-write-wins: `record` replaces whatever was there, `latest` returns
/// `None` until the first ingest.
pub struct TelemetryStore {
    backend: Arc<dyn StorageBackend>,
}

impl TelemetryStore {
    /// Create a telemetry store over the given backend.
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Record a reading, replacing the previous snapshot.
    pub fn record(&self, reading: &SensorReading) -> Result<()> {
        let bytes = serde_json::to_vec(reading)?;
        self.backend.write(TELEMETRY_TABLE, LATEST_KEY, &bytes)?;
        tracing::debug!(
            temperature = reading.temperature,
            humidity = reading.humidity,
            "recorded sensor reading"
        );
        Ok(())
    }

    /// Latest reading, or `None` if nothing was ever ingested.
    ///
    /// Backend failure surfaces as an error, never as `None`.
    pub fn latest(&self) -> Result<Option<SensorReading>> {
        match self.backend.read(TELEMETRY_TABLE, LATEST_KEY)? {
            Some(bytes) => {
                let reading = serde_json::from_slice(&bytes)
                    .map_err(|e| Error::Serialization(e.to_string()))?;
                Ok(Some(reading))
            }
            None => Ok(None),
        }
    }
}
