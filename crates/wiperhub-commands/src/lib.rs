//! Command lifecycle and cross-protocol dispatch for Wiperhub.
//!
//! Provides:
//! - Command record data structures (protocol, wiper target, speed, cycles)
//! - Intent validation against the domain vocabulary
//! - The pending/completed/ignored lifecycle state machine
//! - The durable command log over a storage backend
//! - The dispatch router (intent -> persisted records)
//! - The poll gateway serving each bus controller its outstanding work

pub mod command;
pub mod gateway;
pub mod intent;
pub mod lifecycle;
pub mod router;
pub mod store;

// Re-exports
pub use command::{CommandId, CommandRecord, CommandStatus, Protocol, WipeSpeed, WiperTarget};

pub use intent::{ValidationError, WipeIntent, WipeRequest};

pub use lifecycle::{Outcome, TransitionError, advance};

pub use store::{CommandStore, StoreError};

pub use router::{DispatchError, DispatchRouter};

pub use gateway::{GatewayError, PollGateway};
