//! API error response types

use crate::error::ServerError;
use axum::{
    response::{IntoResponse, Response},
    Json,
};

/// API error response body
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,

    /// Machine-readable error code
    pub code: String,

    /// Whether the error is recoverable (client can retry)
    pub recoverable: bool,

    /// Additional error details (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    fn details_for(error: &ServerError) -> Option<serde_json::Value> {
        match error {
            ServerError::CyclicMove { node, target } => Some(serde_json::json!({
                "node_id": node,
                "target_node_id": target,
            })),
            ServerError::NodeNotFound(id) => Some(serde_json::json!({ "node_id": id })),
            _ => None,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "Request failed");
        }

        let body = ErrorResponse {
            error: self.to_string(),
            code: self.error_code().to_string(),
            recoverable: self.is_recoverable(),
            details: ErrorResponse::details_for(&self),
        };

        (status, Json(body)).into_response()
    }
}
