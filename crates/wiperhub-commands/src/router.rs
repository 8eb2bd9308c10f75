//! Dispatch router.
//!
//! Turns a validated intent into persisted command records, one per
//! delivery target. In the two-bus design an intent names its protocol
//! explicitly, so dispatch yields exactly one record; the `Vec` return is
//! the seam that lets a future protocol-agnostic intent fan out to both
//! buses without changing any caller.

use std::sync::Arc;

use crate::command::{CommandId, CommandRecord, Protocol};
use crate::intent::WipeIntent;
use crate::store::{CommandStore, StoreError};

/// Dispatch failure.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// A store append failed during record creation.
    ///
    /// `created` lists the ids persisted before the failure (empty in the
    /// single-target case), so a multi-target dispatch can never fail
    /// unobservably partway.
    #[error("dispatch failed after {} record(s) created: {source}", created.len())]
    Store {
        /// The underlying store failure.
        source: StoreError,
        /// Ids of records already persisted by this dispatch.
        created: Vec<CommandId>,
    },
}

/// Routes validated intents into the command log.
pub struct DispatchRouter {
    store: Arc<CommandStore>,
}

impl DispatchRouter {
    /// Create a router writing to the given store.
    pub fn new(store: Arc<CommandStore>) -> Self {
        Self { store }
    }

    /// Delivery targets a given intent addresses.
    ///
    /// Today an intent always carries one explicit protocol; a
    /// protocol-agnostic intent would expand here.
    fn delivery_targets(intent: &WipeIntent) -> Vec<Protocol> {
        vec![intent.protocol]
    }

    /// Create and persist one pending record per delivery target.
    ///
    /// At-most-once creation: a failed append is surfaced and never
    /// retried here. Resubmitting the intent creates new, distinct
    /// records; there is no idempotency key de-duplicating submissions.
    pub async fn dispatch(&self, intent: &WipeIntent) -> Result<Vec<CommandRecord>, DispatchError> {
        let mut created = Vec::new();

        for protocol in Self::delivery_targets(intent) {
            let record = CommandRecord::new(protocol, intent.wiper, intent.speed, intent.cycles);
            if let Err(source) = self.store.append(&record).await {
                return Err(DispatchError::Store {
                    source,
                    created: created.into_iter().map(|r: CommandRecord| r.id).collect(),
                });
            }
            tracing::info!(
                id = %record.id,
                protocol = %record.protocol,
                wiper = record.wiper.token(),
                speed = record.speed.token(),
                cycles = record.cycles,
                "dispatched command"
            );
            created.push(record);
        }

        Ok(created)
    }
}
