//! Shared handler plumbing

use axum::body::Bytes;
use serde::de::DeserializeOwned;

use crate::error::{ServerError, ServerResult};

/// Run a synchronous store/engine call off the async runtime
pub async fn blocking<T, F>(f: F) -> ServerResult<T>
where
    F: FnOnce() -> ServerResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ServerError::Internal(format!("spawn_blocking failed: {}", e)))?
}

/// Parse a JSON request body, reporting failures as `InvalidInput`
///
/// Used instead of the `Json` extractor so malformed bodies get the same
/// error shape as every other failure.
pub fn parse_json<T: DeserializeOwned>(body: &Bytes) -> ServerResult<T> {
    if body.is_empty() {
        return Err(ServerError::InvalidInput("request body is empty".into()));
    }
    serde_json::from_slice(body).map_err(ServerError::from)
}
