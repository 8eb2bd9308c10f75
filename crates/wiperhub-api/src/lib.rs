//! HTTP API server for Wiperhub.
//!
//! This crate binds the command lifecycle core to axum: operators submit
//! wipe intents, bus controllers poll their pending queue and report
//! outcomes, the sensor master pushes readings.

pub mod handlers;
pub mod models;
pub mod server;

pub use models::ErrorResponse;
pub use server::{ServerState, create_router_with_state, run};
