//! Application router configuration.

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::types::ServerState;
use crate::handlers::{basic, commands, sensor};

/// Create the application router with a specific state.
pub fn create_router_with_state(state: ServerState) -> Router {
    Router::new()
        // Health check endpoints
        .route("/api/health", get(basic::health_handler))
        .route("/api/health/status", get(basic::health_status_handler))
        // Command lifecycle
        .route(
            "/api/commands",
            post(commands::submit_command_handler).get(commands::list_commands_handler),
        )
        .route(
            "/api/commands/pending",
            get(commands::pending_commands_handler),
        )
        .route("/api/commands/:id", get(commands::get_command_handler))
        .route(
            "/api/commands/:id/complete",
            put(commands::complete_command_handler),
        )
        .route(
            "/api/commands/:id/ignore",
            put(commands::ignore_command_handler),
        )
        // Sensor telemetry
        .route(
            "/api/sensor",
            post(sensor::ingest_sensor_handler).get(sensor::latest_sensor_handler),
        )
        .layer(TraceLayer::new_for_http())
        // Operator UI and the bus masters live on other hosts.
        .layer(CorsLayer::permissive())
        .with_state(state)
}
