//! Request DTOs

use serde::Deserialize;

use crate::tree::{NodeId, Position};

/// POST /api/trees
#[derive(Debug, Deserialize)]
pub struct CreateTreeRequest {
    /// Name of the root node
    pub name: String,
}

/// POST /api/nodes
#[derive(Debug, Deserialize)]
pub struct InsertNodeRequest {
    pub target_node_id: NodeId,
    pub name: String,

    /// Defaults to `last-child`
    #[serde(default)]
    pub position: Position,
}

/// POST /api/nodes/move
#[derive(Debug, Deserialize)]
pub struct MoveNodeRequest {
    pub node_id: NodeId,
    pub target_node_id: NodeId,

    #[serde(default)]
    pub position: Position,
}

/// PATCH /api/nodes/:id
#[derive(Debug, Deserialize)]
pub struct RenameNodeRequest {
    pub name: String,
}
