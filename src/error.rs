//! Server error types

use axum::http::StatusCode;
use thiserror::Error;

use crate::tree::model::NodeId;

/// Main server error type
#[derive(Debug, Error)]
pub enum ServerError {
    // ========== Validation Errors ==========
    /// Missing or empty required field
    #[error("invalid input: {0}")]
    InvalidInput(String),

    // ========== Tree Errors ==========
    /// Referenced node or tree does not exist (or cannot be targeted)
    #[error("invalid target: {0}")]
    InvalidTarget(String),

    /// Direct node lookup failed
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    /// Move destination is the node itself or one of its descendants
    #[error("cannot move node {node} into its own subtree (target {target})")]
    CyclicMove { node: NodeId, target: NodeId },

    /// Transaction could not be serialized; the whole operation may be retried
    #[error("concurrency conflict: {0}")]
    ConcurrencyConflict(String),

    // ========== Storage Errors ==========
    /// Storage operation failed
    #[error("storage error: {0}")]
    Storage(StorageError),

    // ========== Server Errors ==========
    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Storage-specific errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database connection failed
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Transaction failed to commit
    #[error("transaction failed: {0}")]
    TransactionFailed(String),

    /// Data corruption detected
    #[error("data corruption: {0}")]
    Corruption(String),

    /// Storage not initialized
    #[error("storage not initialized")]
    NotInitialized,

    /// SQLite database error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Server result type alias
pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            ServerError::InvalidInput(_) => StatusCode::BAD_REQUEST,

            // 404 Not Found
            ServerError::InvalidTarget(_) | ServerError::NodeNotFound(_) => {
                StatusCode::NOT_FOUND
            }

            // 409 Conflict
            ServerError::CyclicMove { .. } => StatusCode::CONFLICT,

            // 503 Service Unavailable
            ServerError::ConcurrencyConflict(_) => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            ServerError::Storage(_) | ServerError::Internal(_) | ServerError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get error code for API response
    pub fn error_code(&self) -> &'static str {
        match self {
            ServerError::InvalidInput(_) => "INVALID_INPUT",
            ServerError::InvalidTarget(_) => "INVALID_TARGET",
            ServerError::NodeNotFound(_) => "NODE_NOT_FOUND",
            ServerError::CyclicMove { .. } => "CYCLIC_MOVE",
            ServerError::ConcurrencyConflict(_) => "CONCURRENCY_CONFLICT",
            ServerError::Storage(_) => "STORAGE_FAILURE",
            ServerError::Internal(_) => "INTERNAL_ERROR",
            ServerError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Check if error is recoverable (client can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ServerError::ConcurrencyConflict(_)
                | ServerError::Storage(StorageError::ConnectionFailed(_))
        )
    }
}

/// True for SQLite result codes that mean "another writer holds the lock"
fn is_busy(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if matches!(
                err.code,
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
            )
    )
}

// Conversions from external errors

impl From<serde_json::Error> for ServerError {
    fn from(e: serde_json::Error) -> Self {
        ServerError::InvalidInput(format!("invalid JSON: {}", e))
    }
}

impl From<rusqlite::Error> for ServerError {
    fn from(e: rusqlite::Error) -> Self {
        if is_busy(&e) {
            ServerError::ConcurrencyConflict(e.to_string())
        } else {
            ServerError::Storage(StorageError::Sqlite(e))
        }
    }
}

impl From<StorageError> for ServerError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::Sqlite(inner) => inner.into(),
            other => ServerError::Storage(other),
        }
    }
}
