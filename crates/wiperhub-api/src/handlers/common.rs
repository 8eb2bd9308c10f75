//! Shared handler plumbing.

use axum::Json;

use crate::models::ErrorResponse;

/// Result type for JSON handlers.
pub type HandlerResult<T> = Result<Json<T>, ErrorResponse>;

/// Wrap a success value.
pub fn ok<T>(value: T) -> HandlerResult<T> {
    Ok(Json(value))
}
