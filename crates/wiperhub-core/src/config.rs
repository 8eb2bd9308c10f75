//! Hub configuration.
//!
//! Defaults and environment-variable helpers live here so that the CLI,
//! the server, and the tests all resolve settings the same way.

use serde::{Deserialize, Serialize};

/// Which storage backend the hub runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// Persistent redb database under `data_dir`.
    #[default]
    Redb,
    /// Volatile in-memory backend (tests, demos).
    Memory,
}

impl StorageKind {
    /// Parse a storage kind from its token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "redb" => Some(StorageKind::Redb),
            "memory" => Some(StorageKind::Memory),
            _ => None,
        }
    }
}

/// Resolved hub configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubConfig {
    /// Host the API server binds to.
    pub host: String,
    /// Port the API server binds to.
    pub port: u16,
    /// Directory holding the redb database file.
    pub data_dir: String,
    /// Storage backend selection.
    pub storage: StorageKind,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            host: defaults::HOST.to_string(),
            port: defaults::PORT,
            data_dir: defaults::DATA_DIR.to_string(),
            storage: StorageKind::default(),
        }
    }
}

impl HubConfig {
    /// Build a configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        Self {
            host: env_vars::host(),
            port: env_vars::port(),
            data_dir: env_vars::data_dir(),
            storage: env_vars::storage(),
        }
    }

    /// Path of the redb database file under `data_dir`.
    pub fn db_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.data_dir).join(defaults::DB_FILE)
    }
}

/// Default configuration constants.
pub mod defaults {
    pub const HOST: &str = "0.0.0.0";
    pub const PORT: u16 = 3001;
    pub const DATA_DIR: &str = "./data";
    pub const DB_FILE: &str = "wiperhub.redb";
}

/// Environment variable names and parse-or-default accessors.
pub mod env_vars {
    use super::{StorageKind, defaults};

    pub const HOST: &str = "WIPERHUB_HOST";
    pub const PORT: &str = "WIPERHUB_PORT";
    pub const DATA_DIR: &str = "WIPERHUB_DATA_DIR";
    pub const STORAGE: &str = "WIPERHUB_STORAGE";

    /// Bind host from the environment, or the default.
    pub fn host() -> String {
        std::env::var(HOST).unwrap_or_else(|_| defaults::HOST.to_string())
    }

    /// Bind port from the environment, or the default.
    pub fn port() -> u16 {
        std::env::var(PORT)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults::PORT)
    }

    /// Data directory from the environment, or the default.
    pub fn data_dir() -> String {
        std::env::var(DATA_DIR).unwrap_or_else(|_| defaults::DATA_DIR.to_string())
    }

    /// Storage backend from the environment, or the default.
    pub fn storage() -> StorageKind {
        std::env::var(STORAGE)
            .ok()
            .and_then(|s| StorageKind::from_token(&s))
            .unwrap_or_default()
    }
}
