//! Sensor telemetry handlers.
//!
//! The DHT-attached master pushes readings; the UI reads the latest one.

use super::{
    ServerState,
    common::{HandlerResult, ok},
};
use crate::models::{ErrorResponse, SensorIngest};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde_json::json;
use wiperhub_storage::SensorReading;

/// Ingest a sensor reading, replacing the previous snapshot.
///
/// POST /api/sensor
pub async fn ingest_sensor_handler(
    State(state): State<ServerState>,
    Json(payload): Json<SensorIngest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ErrorResponse> {
    if !payload.temperature.is_finite() {
        return Err(ErrorResponse::bad_request("temperature must be a finite number"));
    }
    if !payload.humidity.is_finite() {
        return Err(ErrorResponse::bad_request("humidity must be a finite number"));
    }

    let reading = SensorReading::new(payload.temperature, payload.humidity);
    state
        .telemetry
        .record(&reading)
        .map_err(|e| ErrorResponse::store_unavailable(e.to_string()))?;

    Ok((StatusCode::CREATED, Json(json!(reading))))
}

/// Latest sensor reading, or the no-data sentinel.
///
/// GET /api/sensor
pub async fn latest_sensor_handler(
    State(state): State<ServerState>,
) -> HandlerResult<serde_json::Value> {
    let latest = state
        .telemetry
        .latest()
        .map_err(|e| ErrorResponse::store_unavailable(e.to_string()))?;

    match latest {
        Some(reading) => ok(json!(reading)),
        // Same sentinel the UI has always keyed off: explicit nulls,
        // distinguishable from a store failure (which is a 503).
        None => ok(json!({ "temperature": null, "humidity": null })),
    }
}
