//! Node mutation endpoints

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::helpers::{blocking, parse_json};
use crate::api::dto::{
    CreatedNodeResponse, InsertNodeRequest, MoveNodeRequest, RenameNodeRequest, SuccessResponse,
};
use crate::api::state::AppState;
use crate::error::ServerError;
use crate::tree::{NodeId, TreeId};

/// POST /api/nodes - insert a leaf relative to a target
pub async fn create_node(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreatedNodeResponse>), ServerError> {
    let req: InsertNodeRequest = parse_json(&body)?;
    let engine = state.engine.clone();

    let id = blocking(move || engine.insert_node(req.target_node_id, &req.name, req.position))
        .await?;
    Ok((StatusCode::CREATED, Json(CreatedNodeResponse { id })))
}

/// POST /api/nodes/move - move a subtree
pub async fn move_node(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<SuccessResponse>, ServerError> {
    let req: MoveNodeRequest = parse_json(&body)?;
    let engine = state.engine.clone();

    blocking(move || engine.move_node(req.node_id, req.target_node_id, req.position)).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// POST /api/trees/:tree_id/nodes - insert relative to a target in this tree
pub async fn create_tree_node(
    State(state): State<Arc<AppState>>,
    Path(tree_id): Path<TreeId>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreatedNodeResponse>), ServerError> {
    let req: InsertNodeRequest = parse_json(&body)?;
    let engine = state.engine.clone();

    let id = blocking(move || {
        engine.insert_node_in_tree(tree_id, req.target_node_id, &req.name, req.position)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(CreatedNodeResponse { id })))
}

/// POST /api/trees/:tree_id/nodes/move - move a subtree within this tree
pub async fn move_tree_node(
    State(state): State<Arc<AppState>>,
    Path(tree_id): Path<TreeId>,
    body: Bytes,
) -> Result<Json<SuccessResponse>, ServerError> {
    let req: MoveNodeRequest = parse_json(&body)?;
    let engine = state.engine.clone();

    blocking(move || {
        engine.move_node_in_tree(tree_id, req.node_id, req.target_node_id, req.position)
    })
    .await?;
    Ok(Json(SuccessResponse::ok()))
}

/// PATCH /api/nodes/:id - rename
pub async fn rename_node(
    State(state): State<Arc<AppState>>,
    Path(id): Path<NodeId>,
    body: Bytes,
) -> Result<Json<SuccessResponse>, ServerError> {
    let req: RenameNodeRequest = parse_json(&body)?;
    let engine = state.engine.clone();

    blocking(move || engine.rename_node(id, &req.name)).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// DELETE /api/nodes/:id - delete a node and its subtree
pub async fn delete_node(
    State(state): State<Arc<AppState>>,
    Path(id): Path<NodeId>,
) -> Result<Json<SuccessResponse>, ServerError> {
    let engine = state.engine.clone();

    blocking(move || engine.delete_node(id)).await?;
    Ok(Json(SuccessResponse::ok()))
}
