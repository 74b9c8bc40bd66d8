//! Health endpoint tests

use crate::common::*;
use sqlitetree_server::SqliteStore;

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app();

    let (status, json) = send(&app, axum::http::Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json.get("error").is_none());
}

#[tokio::test]
async fn test_health_endpoint_without_schema() {
    let store = Arc::new(SqliteStore::in_memory().unwrap());
    let app = test_app_with_store(store);

    let (status, json) = send(&app, axum::http::Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["status"], "unhealthy");
    assert_eq!(json["error"], "Storage unavailable");
}
