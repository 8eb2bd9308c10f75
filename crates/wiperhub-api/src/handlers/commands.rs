//! Command API handlers.
//!
//! Submit, poll, and outcome-report endpoints. Command records serialize as
//! their wire contract directly, so no separate DTO layer is needed.

use super::{
    ServerState,
    common::{HandlerResult, ok},
};
use crate::models::{CommandQueryParams, ErrorResponse, PendingQuery};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;
use wiperhub_commands::{
    DispatchError, GatewayError, Outcome, Protocol, StoreError, WipeIntent, WipeRequest,
};

fn map_gateway_error(e: GatewayError) -> ErrorResponse {
    match e {
        GatewayError::NotFound(id) => ErrorResponse::not_found(format!("Command not found: {id}")),
        GatewayError::AlreadyTerminal { id, status } => {
            ErrorResponse::conflict(format!("Command {id} is already {status}"))
        }
        GatewayError::Store(e) => ErrorResponse::store_unavailable(e.to_string()),
    }
}

fn map_store_error(e: StoreError) -> ErrorResponse {
    match e {
        StoreError::NotFound(id) => ErrorResponse::not_found(format!("Command not found: {id}")),
        other => ErrorResponse::store_unavailable(other.to_string()),
    }
}

/// Submit a wipe intent.
///
/// POST /api/commands
pub async fn submit_command_handler(
    State(state): State<ServerState>,
    Json(request): Json<WipeRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ErrorResponse> {
    let intent = WipeIntent::validate(&request)
        .map_err(|e| ErrorResponse::validation(e.to_string(), e.field()))?;

    let records = state.dispatch.dispatch(&intent).await.map_err(|e| {
        let DispatchError::Store { ref created, .. } = e;
        ErrorResponse::dispatch_failed(e.to_string())
            .with_details(json!({ "createdIds": created }))
    })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "commands": records,
            "count": records.len(),
        })),
    ))
}

/// Pending commands for one protocol, oldest first.
///
/// GET /api/commands/pending?protocol=CAN
///
/// Non-destructive: polling does not claim records. Controllers must be
/// idempotent per command id (at-least-once delivery).
pub async fn pending_commands_handler(
    State(state): State<ServerState>,
    Query(query): Query<PendingQuery>,
) -> HandlerResult<serde_json::Value> {
    let protocol = Protocol::from_token(&query.protocol).ok_or_else(|| {
        ErrorResponse::bad_request(format!(
            "unknown protocol {:?}, expected \"CAN\" or \"LIN\"",
            query.protocol
        ))
    })?;

    let records = state
        .gateway
        .fetch_pending(protocol)
        .await
        .map_err(map_gateway_error)?;

    ok(json!({
        "commands": records,
        "count": records.len(),
    }))
}

/// Report successful execution of a command.
///
/// PUT /api/commands/:id/complete
pub async fn complete_command_handler(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> HandlerResult<serde_json::Value> {
    report_outcome(&state, &id, Outcome::Completed).await
}

/// Report that a command was examined and will not be executed.
///
/// PUT /api/commands/:id/ignore
pub async fn ignore_command_handler(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> HandlerResult<serde_json::Value> {
    report_outcome(&state, &id, Outcome::Ignored).await
}

/// Apply an outcome and shape the response.
///
/// A repeated report against a terminal record answers 409 with the current
/// record embedded, so a controller that re-reports the same outcome can
/// confirm the state matches and move on.
async fn report_outcome(
    state: &ServerState,
    id: &str,
    outcome: Outcome,
) -> HandlerResult<serde_json::Value> {
    match state.gateway.report_outcome(id, outcome).await {
        Ok(record) => ok(json!({ "command": record })),
        Err(GatewayError::AlreadyTerminal { id, status }) => {
            let current = state.store.get(&id).await.map_err(map_store_error)?;
            Err(
                ErrorResponse::conflict(format!("Command {id} is already {status}"))
                    .with_details(json!({ "command": current })),
            )
        }
        Err(e) => Err(map_gateway_error(e)),
    }
}

/// List the command log with optional filtering, newest first.
///
/// GET /api/commands
pub async fn list_commands_handler(
    State(state): State<ServerState>,
    Query(params): Query<CommandQueryParams>,
) -> HandlerResult<serde_json::Value> {
    let status = match params.status.as_deref() {
        Some(token) => Some(
            wiperhub_commands::CommandStatus::from_token(token)
                .ok_or_else(|| ErrorResponse::bad_request(format!("unknown status {token:?}")))?,
        ),
        None => None,
    };
    let protocol = match params.protocol.as_deref() {
        Some(token) => Some(
            Protocol::from_token(token)
                .ok_or_else(|| ErrorResponse::bad_request(format!("unknown protocol {token:?}")))?,
        ),
        None => None,
    };

    let mut records = state.store.list().await.map_err(map_store_error)?;
    records.retain(|r| {
        status.map(|s| r.status == s).unwrap_or(true)
            && protocol.map(|p| r.protocol == p).unwrap_or(true)
    });

    // Newest first for the operator log view.
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));

    let total = records.len();
    let offset = params.offset.unwrap_or(0);
    let limit = params.limit.unwrap_or(50);
    let page: Vec<_> = records.into_iter().skip(offset).take(limit).collect();

    ok(json!({
        "commands": page,
        "count": page.len(),
        "total": total,
        "offset": offset,
        "limit": limit,
    }))
}

/// Get a specific command by ID.
///
/// GET /api/commands/:id
pub async fn get_command_handler(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> HandlerResult<serde_json::Value> {
    let record = state.store.get(&id).await.map_err(map_store_error)?;
    ok(json!({ "command": record }))
}
