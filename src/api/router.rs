//! Router setup and configuration

use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::api::handlers;
use crate::api::state::AppState;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        // Projections
        .route("/tree", get(handlers::full_flat_list))
        .route("/tree/indented", get(handlers::full_indented_view))
        .route(
            "/trees",
            get(handlers::list_trees).post(handlers::create_tree),
        )
        .route(
            "/trees/:tree_id/nodes",
            get(handlers::tree_nodes).post(handlers::create_tree_node),
        )
        .route("/trees/:tree_id/nodes/move", post(handlers::move_tree_node))
        .route("/trees/:tree_id/indented", get(handlers::tree_indented))
        .route("/trees/:tree_id/verify", get(handlers::verify_tree))
        // Mutations
        .route("/nodes", post(handlers::create_node))
        .route("/nodes/move", post(handlers::move_node))
        .route(
            "/nodes/:id",
            patch(handlers::rename_node).delete(handlers::delete_node),
        );

    Router::new()
        .nest("/api", api)
        .route("/health", get(handlers::health_check))
        .with_state(state)
}
