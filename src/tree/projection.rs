//! Read-only views over committed tree state

use std::sync::Arc;

use serde::Serialize;

use super::model::{Node, TreeId};
use super::verify::VerifyReport;
use crate::error::ServerResult;
use crate::traits::TreeStore;

/// One line of the indented view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndentedNode {
    #[serde(flatten)]
    pub node: Node,

    /// Indentation depth, equal to the node's level
    pub depth: i64,
}

impl IndentedNode {
    /// Name prefixed with two spaces per level
    pub fn label(&self) -> String {
        format!("{}{}", "  ".repeat(self.depth.max(0) as usize), self.node.name)
    }
}

/// Projections read the store directly and never go through the engine
#[derive(Clone)]
pub struct TreeProjections {
    store: Arc<dyn TreeStore>,
}

impl TreeProjections {
    pub fn new(store: Arc<dyn TreeStore>) -> Self {
        Self { store }
    }

    /// Nodes of one tree in preorder; an unknown tree gives an empty list
    pub fn flat_list(&self, tree_id: TreeId) -> ServerResult<Vec<Node>> {
        self.store.list_tree(tree_id)
    }

    /// Every node of every tree, ordered by `(tree_id, lft)`
    pub fn full_flat_list(&self) -> ServerResult<Vec<Node>> {
        self.store.list_all()
    }

    pub fn indented_view(&self, tree_id: TreeId) -> ServerResult<Vec<IndentedNode>> {
        Ok(indent(self.flat_list(tree_id)?))
    }

    /// Indented view of all trees, one after the other
    pub fn full_indented_view(&self) -> ServerResult<Vec<IndentedNode>> {
        Ok(indent(self.full_flat_list()?))
    }

    /// Root of every tree, ordered by tree id
    pub fn list_trees(&self) -> ServerResult<Vec<Node>> {
        self.store.list_roots()
    }

    /// Check one tree's structural invariants
    pub fn verify(&self, tree_id: TreeId) -> ServerResult<VerifyReport> {
        let nodes = self.flat_list(tree_id)?;
        let report = VerifyReport::new(tree_id, &nodes);
        if let Some(violation) = &report.violation {
            tracing::warn!(tree_id, %violation, "Tree invariant violated");
        }
        Ok(report)
    }
}

fn indent(nodes: Vec<Node>) -> Vec<IndentedNode> {
    nodes
        .into_iter()
        .map(|node| IndentedNode {
            depth: node.level,
            node,
        })
        .collect()
}
