//! Standardized API error responses.
//!
//! Every failure leaves the handler as an [`ErrorResponse`] with a
//! machine-readable code, so callers branch on `code` rather than parsing
//! messages.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

/// API error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional structured details (offending field, current record, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// HTTP status the response is sent with.
    #[serde(skip)]
    pub status: StatusCode,
}

impl ErrorResponse {
    fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
            status,
        }
    }

    /// Attach structured details.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// 400, malformed request (bad token, missing parameter).
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    /// 400, intent rejected by the validator; `field` names the offender.
    pub fn validation(message: impl Into<String>, field: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "VALIDATION_FAILED", message)
            .with_details(json!({ "field": field }))
    }

    /// 404, unknown record id.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    /// 409, record already terminal.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, "CONFLICT", message)
    }

    /// 502, command creation failed against the store.
    pub fn dispatch_failed(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, "DISPATCH_FAILED", message)
    }

    /// 503, storage backend unavailable.
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "STORE_UNAVAILABLE",
            message,
        )
    }

    /// 500, anything that should not happen.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = self.status;
        let body = json!({ "error": self });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_statuses() {
        assert_eq!(ErrorResponse::bad_request("x").status, StatusCode::BAD_REQUEST);
        assert_eq!(ErrorResponse::not_found("x").status, StatusCode::NOT_FOUND);
        assert_eq!(ErrorResponse::conflict("x").status, StatusCode::CONFLICT);
        assert_eq!(
            ErrorResponse::store_unavailable("x").status,
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ErrorResponse::dispatch_failed("x").code,
            "DISPATCH_FAILED".to_string()
        );
    }

    #[test]
    fn test_validation_details_name_the_field() {
        let err = ErrorResponse::validation("invalid cycles", "cycles");
        assert_eq!(err.code, "VALIDATION_FAILED");
        assert_eq!(err.details.unwrap()["field"], "cycles");
    }
}
