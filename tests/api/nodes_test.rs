//! Node mutation endpoint tests

use crate::common::*;
use axum::http::Method;
use serde_json::json;

async fn nodes_of(app: &axum::Router, tree: i64) -> Vec<(String, i64, i64, i64)> {
    let (status, json) = send(app, Method::GET, &format!("/api/trees/{tree}/nodes"), None).await;
    assert_eq!(status, StatusCode::OK);
    rows(&json)
}

#[tokio::test]
async fn test_insert_move_delete_scenario() {
    let app = test_app();
    let (tree, root) = create_tree(&app, "R").await;
    assert_eq!(nodes_of(&app, tree).await, vec![row("R", 1, 2, 0)]);

    let a = insert(&app, root, "A", "last-child").await;
    assert_eq!(
        nodes_of(&app, tree).await,
        vec![row("R", 1, 4, 0), row("A", 2, 3, 1)]
    );

    let b = insert(&app, root, "B", "last-child").await;
    assert_eq!(
        nodes_of(&app, tree).await,
        vec![row("R", 1, 6, 0), row("A", 2, 3, 1), row("B", 4, 5, 1)]
    );

    let (status, json) = send(
        &app,
        Method::POST,
        "/api/nodes/move",
        Some(json!({ "node_id": a, "target_node_id": b, "position": "last-child" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(
        nodes_of(&app, tree).await,
        vec![row("R", 1, 6, 0), row("B", 2, 5, 1), row("A", 3, 4, 2)]
    );

    let (status, _) = send(&app, Method::DELETE, &format!("/api/nodes/{b}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(nodes_of(&app, tree).await, vec![row("R", 1, 2, 0)]);
}

#[tokio::test]
async fn test_insert_defaults_to_last_child() {
    let app = test_app();
    let (tree, root) = create_tree(&app, "R").await;
    insert(&app, root, "A", "last-child").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/nodes",
        Some(json!({ "target_node_id": root, "name": "B" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let names: Vec<_> = nodes_of(&app, tree).await.into_iter().map(|r| r.0).collect();
    assert_eq!(names, vec!["R", "A", "B"]);
}

#[tokio::test]
async fn test_sibling_aliases() {
    let app = test_app();
    let (tree, root) = create_tree(&app, "R").await;
    let m = insert(&app, root, "M", "last-child").await;
    insert(&app, m, "L", "left").await;
    insert(&app, m, "N", "right").await;

    let names: Vec<_> = nodes_of(&app, tree).await.into_iter().map(|r| r.0).collect();
    assert_eq!(names, vec!["R", "L", "M", "N"]);
}

#[tokio::test]
async fn test_insert_unknown_target() {
    let app = test_app();

    let (status, json) = send(
        &app,
        Method::POST,
        "/api/nodes",
        Some(json!({ "target_node_id": 404, "name": "X" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "INVALID_TARGET");
}

#[tokio::test]
async fn test_insert_bad_position() {
    let app = test_app();
    let (_, root) = create_tree(&app, "R").await;

    let (status, json) = send(
        &app,
        Method::POST,
        "/api/nodes",
        Some(json!({ "target_node_id": root, "name": "X", "position": "inside" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_root_sibling_rejected() {
    let app = test_app();
    let (tree, root) = create_tree(&app, "R").await;

    let (status, json) = send(
        &app,
        Method::POST,
        "/api/nodes",
        Some(json!({ "target_node_id": root, "name": "X", "position": "after" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "INVALID_TARGET");
    assert_eq!(nodes_of(&app, tree).await, vec![row("R", 1, 2, 0)]);
}

#[tokio::test]
async fn test_cyclic_move_leaves_tree_unchanged() {
    let app = test_app();
    let (tree, root) = create_tree(&app, "R").await;
    let a = insert(&app, root, "A", "last-child").await;
    let a1 = insert(&app, a, "A1", "last-child").await;
    let before = nodes_of(&app, tree).await;

    let (status, json) = send(
        &app,
        Method::POST,
        "/api/nodes/move",
        Some(json!({ "node_id": a, "target_node_id": a1, "position": "first-child" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CYCLIC_MOVE");
    assert_eq!(json["details"]["node_id"], a);
    assert_eq!(nodes_of(&app, tree).await, before);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/nodes/move",
        Some(json!({ "node_id": a, "target_node_id": a })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_move_across_trees_rejected() {
    let app = test_app();
    let (_, r1) = create_tree(&app, "R1").await;
    let (_, r2) = create_tree(&app, "R2").await;
    let a = insert(&app, r1, "A", "last-child").await;

    let (status, json) = send(
        &app,
        Method::POST,
        "/api/nodes/move",
        Some(json!({ "node_id": a, "target_node_id": r2 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "INVALID_TARGET");
}

#[tokio::test]
async fn test_rename() {
    let app = test_app();
    let (tree, root) = create_tree(&app, "R").await;
    let a = insert(&app, root, "A", "last-child").await;

    let (status, json) = send(
        &app,
        Method::PATCH,
        &format!("/api/nodes/{a}"),
        Some(json!({ "name": "Alpha" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(
        nodes_of(&app, tree).await,
        vec![row("R", 1, 4, 0), row("Alpha", 2, 3, 1)]
    );

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/nodes/{a}"),
        Some(json!({ "name": " " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/api/nodes/9999",
        Some(json!({ "name": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_root_and_repeat() {
    let app = test_app();
    let (tree, root) = create_tree(&app, "R").await;
    insert(&app, root, "A", "last-child").await;

    let (status, _) = send(&app, Method::DELETE, &format!("/api/nodes/{root}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(nodes_of(&app, tree).await.is_empty());

    let (status, json) = send(&app, Method::DELETE, &format!("/api/nodes/{root}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "INVALID_TARGET");

    let (_, json) = send(&app, Method::GET, "/api/trees", None).await;
    assert_eq!(json, json!([]));
}
