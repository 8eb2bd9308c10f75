//! Server state and types.

use std::sync::Arc;

use wiperhub_commands::{CommandStore, DispatchRouter, PollGateway};
use wiperhub_core::storage::StorageBackend;
use wiperhub_storage::TelemetryStore;

/// Server state shared across all handlers.
///
/// Every component owns an explicit handle to the one shared backend;
/// there is no ambient global connection and no per-request setup.
#[derive(Clone)]
pub struct ServerState {
    /// Durable command log.
    pub store: Arc<CommandStore>,

    /// Intent dispatch (submit path).
    pub dispatch: Arc<DispatchRouter>,

    /// Poll endpoint core (consumer path).
    pub gateway: Arc<PollGateway>,

    /// Latest sensor snapshot.
    pub telemetry: Arc<TelemetryStore>,

    /// Server start timestamp.
    pub started_at: i64,
}

impl ServerState {
    /// Build the full state over one storage backend.
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let store = Arc::new(CommandStore::new(backend.clone()));
        let dispatch = Arc::new(DispatchRouter::new(store.clone()));
        let gateway = Arc::new(PollGateway::new(store.clone()));
        let telemetry = Arc::new(TelemetryStore::new(backend));

        Self {
            store,
            dispatch,
            gateway,
            telemetry,
            started_at: chrono::Utc::now().timestamp(),
        }
    }
}
