//! Test fixtures and app setup utilities

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlitetree_server::api::{create_router, AppState};
use sqlitetree_server::config::EngineConfig;
use sqlitetree_server::traits::TreeStore;
use sqlitetree_server::tree::verify;
use sqlitetree_server::{SqliteStore, TreeId};
use tower::ServiceExt;

/// Engine settings for tests: retries on, no sleeping
pub fn test_engine_config() -> EngineConfig {
    EngineConfig {
        max_retries: 2,
        retry_backoff_ms: 0,
    }
}

/// Fresh initialized in-memory store
pub fn test_store() -> Arc<SqliteStore> {
    let store = SqliteStore::in_memory().expect("Failed to create in-memory storage");
    store.initialize().expect("Failed to initialize storage");
    Arc::new(store)
}

/// Create a test app with in-memory storage
pub fn test_app() -> Router {
    test_app_with_store(test_store())
}

/// Create a test app over an existing store
pub fn test_app_with_store(store: Arc<SqliteStore>) -> Router {
    let state = AppState::new(store, test_engine_config());
    create_router(Arc::new(state))
}

/// Send one request, return status and parsed JSON body (`Null` if empty)
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// POST /api/trees, returns (tree_id, root_id)
pub async fn create_tree(app: &Router, name: &str) -> (i64, i64) {
    let (status, json) = send(
        app,
        Method::POST,
        "/api/trees",
        Some(serde_json::json!({ "name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    (json["tree_id"].as_i64().unwrap(), json["id"].as_i64().unwrap())
}

/// POST /api/nodes, returns the new id
pub async fn insert(app: &Router, target: i64, name: &str, position: &str) -> i64 {
    let (status, json) = send(
        app,
        Method::POST,
        "/api/nodes",
        Some(serde_json::json!({
            "target_node_id": target,
            "name": name,
            "position": position,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    json["id"].as_i64().unwrap()
}

/// (name, lft, rgt, level) rows of a JSON node list
pub fn rows(json: &Value) -> Vec<(String, i64, i64, i64)> {
    json.as_array()
        .unwrap()
        .iter()
        .map(|n| {
            (
                n["name"].as_str().unwrap().to_string(),
                n["lft"].as_i64().unwrap(),
                n["rgt"].as_i64().unwrap(),
                n["level"].as_i64().unwrap(),
            )
        })
        .collect()
}

pub fn row(name: &str, lft: i64, rgt: i64, level: i64) -> (String, i64, i64, i64) {
    (name.to_string(), lft, rgt, level)
}

/// Panic if the stored tree breaks any structural invariant
pub fn assert_tree_valid(store: &SqliteStore, tree_id: TreeId) {
    let nodes = store.list_tree(tree_id).unwrap();
    if let Err(violation) = verify::check_tree(&nodes) {
        panic!("tree {tree_id} invalid: {violation}\n{nodes:#?}");
    }
}
