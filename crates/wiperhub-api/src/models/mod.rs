//! Request and response models for the web API.

use serde::Deserialize;

pub mod error;

pub use error::ErrorResponse;

/// Sensor ingest payload from the DHT-attached master.
#[derive(Debug, Clone, Deserialize)]
pub struct SensorIngest {
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
}

/// Query parameters for the pending-commands poll.
#[derive(Debug, Deserialize)]
pub struct PendingQuery {
    /// Wire token of the polling protocol ("CAN" or "LIN"). Explicit on
    /// purpose: the caller's network identity never selects the queue.
    pub protocol: String,
}

/// Query parameters for command listing.
#[derive(Debug, Deserialize)]
pub struct CommandQueryParams {
    /// Filter by status token.
    pub status: Option<String>,
    /// Filter by protocol token.
    pub protocol: Option<String>,
    /// Maximum number of results.
    pub limit: Option<usize>,
    /// Offset for pagination.
    pub offset: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_query_params_default() {
        let params: CommandQueryParams = serde_json::from_str("{}").unwrap();
        assert!(params.status.is_none());
        assert!(params.protocol.is_none());
        assert_eq!(params.limit, None);
        assert_eq!(params.offset, None);
    }

    #[test]
    fn test_command_query_params_with_filters() {
        let params: CommandQueryParams =
            serde_json::from_str(r#"{"status":"pending","protocol":"CAN","limit":10}"#).unwrap();
        assert_eq!(params.status, Some("pending".to_string()));
        assert_eq!(params.protocol, Some("CAN".to_string()));
        assert_eq!(params.limit, Some(10));
    }
}
