//! Tree-scoped node endpoint tests

use crate::common::*;
use axum::http::Method;
use serde_json::json;

async fn nodes_of(app: &axum::Router, tree: i64) -> Vec<(String, i64, i64, i64)> {
    let (status, json) = send(app, Method::GET, &format!("/api/trees/{tree}/nodes"), None).await;
    assert_eq!(status, StatusCode::OK);
    rows(&json)
}

#[tokio::test]
async fn test_scoped_insert_and_move() {
    let app = test_app();
    let (tree, root) = create_tree(&app, "R").await;

    let (status, json) = send(
        &app,
        Method::POST,
        &format!("/api/trees/{tree}/nodes"),
        Some(json!({ "target_node_id": root, "name": "A", "position": "last-child" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let a = json["id"].as_i64().unwrap();

    // Position defaults to last-child like the unscoped route
    let (status, json) = send(
        &app,
        Method::POST,
        &format!("/api/trees/{tree}/nodes"),
        Some(json!({ "target_node_id": root, "name": "B" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let b = json["id"].as_i64().unwrap();

    let (status, json) = send(
        &app,
        Method::POST,
        &format!("/api/trees/{tree}/nodes/move"),
        Some(json!({ "node_id": b, "target_node_id": a, "position": "left" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(
        nodes_of(&app, tree).await,
        vec![row("R", 1, 6, 0), row("B", 2, 3, 1), row("A", 4, 5, 1)]
    );
}

#[tokio::test]
async fn test_scoped_routes_reject_nodes_of_other_trees() {
    let app = test_app();
    let (t1, r1) = create_tree(&app, "R1").await;
    let a = insert(&app, r1, "A", "last-child").await;
    let (t2, r2) = create_tree(&app, "R2").await;
    let x = insert(&app, r2, "X", "last-child").await;

    let first = nodes_of(&app, t1).await;
    let second = nodes_of(&app, t2).await;

    // Insert into tree 1 against a tree-2 target
    let (status, json) = send(
        &app,
        Method::POST,
        &format!("/api/trees/{t1}/nodes"),
        Some(json!({ "target_node_id": x, "name": "N" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "INVALID_TARGET");

    // Moved node from tree 2, path names tree 1
    let (status, json) = send(
        &app,
        Method::POST,
        &format!("/api/trees/{t1}/nodes/move"),
        Some(json!({ "node_id": x, "target_node_id": r2, "position": "first-child" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "INVALID_TARGET");

    // Target from tree 2
    let (status, json) = send(
        &app,
        Method::POST,
        &format!("/api/trees/{t1}/nodes/move"),
        Some(json!({ "node_id": a, "target_node_id": x, "position": "after" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "INVALID_TARGET");

    assert_eq!(nodes_of(&app, t1).await, first);
    assert_eq!(nodes_of(&app, t2).await, second);
}

#[tokio::test]
async fn test_scoped_insert_validates_body() {
    let app = test_app();
    let (tree, root) = create_tree(&app, "R").await;

    let (status, json) = send(
        &app,
        Method::POST,
        &format!("/api/trees/{tree}/nodes"),
        Some(json!({ "target_node_id": root, "name": "  " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_INPUT");
    assert_eq!(nodes_of(&app, tree).await, vec![row("R", 1, 2, 0)]);
}
