//! Durable command log.
//!
//! `CommandStore` is the typed, append-only log of command records over an
//! injected storage backend. Records are keyed by id and serialized as JSON
//! because the record layout is the wire contract (literal enum tokens,
//! RFC 3339 timestamps). The store never caches records across calls: every
//! read goes to the backend so a poller can never observe a stale
//! pending/terminal boundary.

use std::sync::Arc;

use tokio::sync::Mutex;

use wiperhub_core::storage::{StorageBackend, StorageError};

use crate::command::{CommandId, CommandRecord, CommandStatus, Protocol};
use crate::lifecycle::{Outcome, TransitionError, advance};

/// Storage table holding command records.
const COMMANDS_TABLE: &str = "commands";

/// Command store error types.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Backend/infrastructure failure. Always surfaced, never a silent no-op.
    #[error("command store unavailable: {0}")]
    Unavailable(String),

    /// A record failed to serialize or deserialize.
    #[error("command serialization failed: {0}")]
    Serialization(String),

    /// No record with the given id exists.
    #[error("command not found: {0}")]
    NotFound(CommandId),

    /// The record is already terminal; the transition did not happen.
    #[error("command {id} is already {status}")]
    AlreadyTerminal {
        /// The record that was addressed.
        id: CommandId,
        /// The terminal status it already holds.
        status: CommandStatus,
    },
}

impl From<StorageError> for StoreError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::Serialization(s) => StoreError::Serialization(s),
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}

/// Result type for command store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Typed command log over a storage backend.
pub struct CommandStore {
    backend: Arc<dyn StorageBackend>,
    /// Serializes conditional status updates so that of two racing
    /// transitions exactly one wins and the loser observes the terminal
    /// state the winner wrote.
    write_lock: Mutex<()>,
}

impl CommandStore {
    /// Create a command store over the given backend.
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            write_lock: Mutex::new(()),
        }
    }

    /// Append a freshly created record.
    ///
    /// One write per record; a backend failure surfaces here and the
    /// record does not exist afterwards.
    pub async fn append(&self, record: &CommandRecord) -> Result<()> {
        let bytes =
            serde_json::to_vec(record).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.backend.write(COMMANDS_TABLE, &record.id, &bytes)?;
        tracing::debug!(id = %record.id, protocol = %record.protocol, "appended command record");
        Ok(())
    }

    /// Get a record by id.
    pub async fn get(&self, id: &str) -> Result<CommandRecord> {
        match self.backend.read(COMMANDS_TABLE, id)? {
            Some(bytes) => {
                serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization(e.to_string()))
            }
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }

    /// All records, in unspecified order.
    pub async fn list(&self) -> Result<Vec<CommandRecord>> {
        let mut records = Vec::new();
        for (key, bytes) in self.backend.scan(COMMANDS_TABLE, "")? {
            let record: CommandRecord = serde_json::from_slice(&bytes).map_err(|e| {
                StoreError::Serialization(format!("record {key} is corrupt: {e}"))
            })?;
            records.push(record);
        }
        Ok(records)
    }

    /// Records with the given status.
    pub async fn list_by_status(&self, status: CommandStatus) -> Result<Vec<CommandRecord>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|r| r.status == status)
            .collect())
    }

    /// Records owned by the given protocol.
    pub async fn list_by_protocol(&self, protocol: Protocol) -> Result<Vec<CommandRecord>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|r| r.protocol == protocol)
            .collect())
    }

    /// Pending records for the given protocol, oldest first.
    ///
    /// FIFO by `created_at` with the id as tie-break, so two records
    /// stamped in the same millisecond still return in a stable order.
    pub async fn pending_for(&self, protocol: Protocol) -> Result<Vec<CommandRecord>> {
        let mut records: Vec<CommandRecord> = self
            .list()
            .await?
            .into_iter()
            .filter(|r| r.protocol == protocol && r.status == CommandStatus::Pending)
            .collect();
        records.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(records)
    }

    /// Atomically apply a reported outcome to a record.
    ///
    /// The read-check-write runs under the store's write lock: of two
    /// concurrent reports against the same record, the first wins and the
    /// second gets [`StoreError::AlreadyTerminal`] with the status the
    /// winner persisted. Returns the updated record.
    pub async fn transition(&self, id: &str, outcome: Outcome) -> Result<CommandRecord> {
        let _guard = self.write_lock.lock().await;

        let mut record = self.get(id).await?;
        match advance(record.status, outcome) {
            Ok(next) => {
                record.status = next;
            }
            Err(TransitionError::AlreadyTerminal { status }) => {
                return Err(StoreError::AlreadyTerminal {
                    id: id.to_string(),
                    status,
                });
            }
        }

        let bytes =
            serde_json::to_vec(&record).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.backend.write(COMMANDS_TABLE, &record.id, &bytes)?;
        tracing::info!(id = %record.id, status = %record.status, "command transitioned");
        Ok(record)
    }
}
