//! In-memory storage backend implementation.
//!
//! Provides non-persistent storage for testing and development.

use wiperhub_core::storage::{Result as CoreResult, StorageBackend, StorageError};
use std::collections::HashMap;
use std::sync::{Arc, RwLock as StdRwLock};

type Result<T> = CoreResult<T>;

/// Configuration for MemoryBackend.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize, Default)]
pub struct MemoryBackendConfig {
    /// Initial capacity hint (optional).
    #[serde(default)]
    pub capacity: Option<usize>,
}

impl MemoryBackendConfig {
    /// Create a new config with default settings.
    pub fn new() -> Self {
        Self { capacity: None }
    }

    /// Set initial capacity hint.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }
}

/// In-memory storage backend for testing.
pub struct MemoryBackend {
    /// In-memory data storage, table -> key -> value.
    data: Arc<StdRwLock<HashMap<String, HashMap<String, Vec<u8>>>>>,
}

impl MemoryBackend {
    /// Create a new in-memory backend.
    pub fn new(config: MemoryBackendConfig) -> Self {
        let data = if let Some(capacity) = config.capacity {
            HashMap::with_capacity(capacity)
        } else {
            HashMap::new()
        };

        Self {
            data: Arc::new(StdRwLock::new(data)),
        }
    }

    /// Create with default configuration.
    pub fn default_config() -> Self {
        Self::new(MemoryBackendConfig::new())
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::default_config()
    }
}

impl StorageBackend for MemoryBackend {
    fn write(&self, table: &str, key: &str, value: &[u8]) -> Result<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        let table_data = data.entry(table.to_string()).or_default();
        table_data.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn read(&self, table: &str, key: &str) -> Result<Option<Vec<u8>>> {
        let data = self
            .data
            .read()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(data.get(table).and_then(|t| t.get(key)).cloned())
    }

    fn delete(&self, table: &str, key: &str) -> Result<bool> {
        let mut data = self
            .data
            .write()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(data
            .get_mut(table)
            .map(|t| t.remove(key).is_some())
            .unwrap_or(false))
    }

    fn scan(&self, table: &str, prefix: &str) -> Result<Vec<(String, Vec<u8>)>> {
        let data = self
            .data
            .read()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        let mut results = Vec::new();
        if let Some(table_data) = data.get(table) {
            for (key, value) in table_data.iter() {
                if key.starts_with(prefix) {
                    results.push((key.clone(), value.clone()));
                }
            }
        }
        Ok(results)
    }

    fn write_batch(&self, table: &str, items: Vec<(String, Vec<u8>)>) -> Result<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        let table_data = data.entry(table.to_string()).or_default();
        for (key, value) in items {
            table_data.insert(key, value);
        }
        Ok(())
    }

    fn is_persistent(&self) -> bool {
        false
    }
}
