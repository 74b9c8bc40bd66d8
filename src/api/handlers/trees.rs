//! Tree-level endpoints: listings, projections and root creation

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::helpers::{blocking, parse_json};
use crate::api::dto::{CreateTreeRequest, CreatedTreeResponse};
use crate::api::state::AppState;
use crate::error::ServerError;
use crate::tree::{IndentedNode, Node, TreeId, VerifyReport};

/// GET /api/tree - every node of every tree, `(tree_id, lft)` order
pub async fn full_flat_list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Node>>, ServerError> {
    let projections = state.projections.clone();
    blocking(move || projections.full_flat_list()).await.map(Json)
}

/// GET /api/tree/indented - indented view of every tree
pub async fn full_indented_view(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<IndentedNode>>, ServerError> {
    let projections = state.projections.clone();
    blocking(move || projections.full_indented_view())
        .await
        .map(Json)
}

/// GET /api/trees - root of every tree
pub async fn list_trees(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Node>>, ServerError> {
    let projections = state.projections.clone();
    blocking(move || projections.list_trees()).await.map(Json)
}

/// POST /api/trees - start a new tree
pub async fn create_tree(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreatedTreeResponse>), ServerError> {
    let req: CreateTreeRequest = parse_json(&body)?;
    let engine = state.engine.clone();

    let (tree_id, id) = blocking(move || engine.create_root(&req.name)).await?;
    Ok((StatusCode::CREATED, Json(CreatedTreeResponse { tree_id, id })))
}

/// GET /api/trees/:tree_id/nodes - one tree in preorder
pub async fn tree_nodes(
    State(state): State<Arc<AppState>>,
    Path(tree_id): Path<TreeId>,
) -> Result<Json<Vec<Node>>, ServerError> {
    let projections = state.projections.clone();
    blocking(move || projections.flat_list(tree_id)).await.map(Json)
}

/// GET /api/trees/:tree_id/indented
pub async fn tree_indented(
    State(state): State<Arc<AppState>>,
    Path(tree_id): Path<TreeId>,
) -> Result<Json<Vec<IndentedNode>>, ServerError> {
    let projections = state.projections.clone();
    blocking(move || projections.indented_view(tree_id))
        .await
        .map(Json)
}

/// GET /api/trees/:tree_id/verify - invariant report
pub async fn verify_tree(
    State(state): State<Arc<AppState>>,
    Path(tree_id): Path<TreeId>,
) -> Result<Json<VerifyReport>, ServerError> {
    let projections = state.projections.clone();
    blocking(move || projections.verify(tree_id)).await.map(Json)
}
