//! Poll gateway.
//!
//! Serves each bus controller its outstanding work and records terminal
//! outcomes. The protocol is an explicit parameter on every operation,
//! never inferred from the caller's network identity, so a multi-tenant
//! deployment stays honest.

use std::sync::Arc;

use crate::command::{CommandId, CommandRecord, CommandStatus, Protocol};
use crate::lifecycle::Outcome;
use crate::store::{CommandStore, StoreError};

/// Gateway operation failure.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// No record with the given id exists.
    #[error("command not found: {0}")]
    NotFound(CommandId),

    /// The record is already terminal.
    ///
    /// Callers reporting the same outcome twice should treat this as a
    /// benign idempotent no-op; a differing outcome is a genuine conflict.
    #[error("command {id} is already {status}")]
    AlreadyTerminal {
        /// The record that was addressed.
        id: CommandId,
        /// The terminal status it already holds.
        status: CommandStatus,
    },

    /// Backend/infrastructure failure.
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for GatewayError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => GatewayError::NotFound(id),
            StoreError::AlreadyTerminal { id, status } => {
                GatewayError::AlreadyTerminal { id, status }
            }
            other => GatewayError::Store(other),
        }
    }
}

/// Poll endpoint for the bus controllers.
pub struct PollGateway {
    store: Arc<CommandStore>,
}

impl PollGateway {
    /// Create a gateway over the given store.
    pub fn new(store: Arc<CommandStore>) -> Self {
        Self { store }
    }

    /// Pending records for the given protocol, oldest first.
    ///
    /// Non-destructive read: nothing is claimed or locked, so a slow or
    /// repeatedly polling controller may observe the same record more than
    /// once before it reports an outcome. Delivery is at-least-once by
    /// design; controllers are expected to be idempotent per command id.
    /// A claim-lease scheme (ownership token + expiry) would strengthen
    /// this to at-most-once and can be layered here without changing the
    /// record model.
    pub async fn fetch_pending(&self, protocol: Protocol) -> Result<Vec<CommandRecord>, GatewayError> {
        let records = self.store.pending_for(protocol).await?;
        tracing::debug!(protocol = %protocol, count = records.len(), "served pending commands");
        Ok(records)
    }

    /// Record a controller's terminal verdict for a command.
    ///
    /// Returns the updated record. Exactly one of two racing reports wins;
    /// the loser observes [`GatewayError::AlreadyTerminal`] carrying the
    /// status the winner persisted.
    pub async fn report_outcome(
        &self,
        id: &str,
        outcome: Outcome,
    ) -> Result<CommandRecord, GatewayError> {
        let record = self.store.transition(id, outcome).await?;
        Ok(record)
    }
}
