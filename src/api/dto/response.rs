//! Response DTOs

use serde::Serialize;

use crate::tree::{NodeId, TreeId};

/// 201 body of POST /api/trees
#[derive(Debug, Serialize)]
pub struct CreatedTreeResponse {
    pub tree_id: TreeId,

    /// Id of the root node
    pub id: NodeId,
}

/// 201 body of POST /api/nodes
#[derive(Debug, Serialize)]
pub struct CreatedNodeResponse {
    pub id: NodeId,
}

/// Body of mutations that create nothing
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "unhealthy"
    pub status: String,

    /// Crate version
    pub version: String,

    /// Error message if unhealthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
