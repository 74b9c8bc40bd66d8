//! Structural checks over the stored rows of one tree

use serde::Serialize;
use thiserror::Error;

use super::model::{Node, NodeId, TreeId};

/// First broken invariant found in a tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("node {id} has lft {lft} >= rgt {rgt}")]
    EmptyInterval { id: NodeId, lft: i64, rgt: i64 },

    #[error("node {id} belongs to tree {found}, expected {expected}")]
    ForeignNode {
        id: NodeId,
        expected: TreeId,
        found: TreeId,
    },

    #[error("root {id} has bounds ({lft}, {rgt}) for {count} nodes")]
    RootBounds {
        id: NodeId,
        lft: i64,
        rgt: i64,
        count: usize,
    },

    #[error("tree has a second root {id}")]
    ExtraRoot { id: NodeId },

    #[error("node {id} partially overlaps node {other}")]
    PartialOverlap { id: NodeId, other: NodeId },

    #[error("node {id} has level {level}, but {ancestors} ancestors")]
    WrongLevel {
        id: NodeId,
        level: i64,
        ancestors: usize,
    },

    #[error("bound values do not cover 1..={expected_max} exactly once")]
    SparseBounds { expected_max: i64 },
}

/// Outcome of checking one tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    pub tree_id: TreeId,
    pub node_count: usize,
    pub valid: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub violation: Option<String>,
}

impl VerifyReport {
    pub fn new(tree_id: TreeId, nodes: &[Node]) -> Self {
        let violation = check_tree(nodes).err().map(|v| v.to_string());
        Self {
            tree_id,
            node_count: nodes.len(),
            valid: violation.is_none(),
            violation,
        }
    }
}

/// Check the rows of one tree, given in `lft` order
///
/// An empty slice is a valid (deleted or never created) tree.
pub fn check_tree(nodes: &[Node]) -> Result<(), Violation> {
    let Some(root) = nodes.first() else {
        return Ok(());
    };

    let count = nodes.len();
    if root.lft != 1 || !root.is_root() || root.rgt != 2 * count as i64 {
        return Err(Violation::RootBounds {
            id: root.id,
            lft: root.lft,
            rgt: root.rgt,
            count,
        });
    }

    // Open ancestors of the current node, innermost last
    let mut stack: Vec<&Node> = Vec::new();
    let mut bounds: Vec<i64> = Vec::with_capacity(count * 2);

    for node in nodes {
        if node.tree_id != root.tree_id {
            return Err(Violation::ForeignNode {
                id: node.id,
                expected: root.tree_id,
                found: node.tree_id,
            });
        }
        if node.lft >= node.rgt {
            return Err(Violation::EmptyInterval {
                id: node.id,
                lft: node.lft,
                rgt: node.rgt,
            });
        }
        if node.is_root() && node.id != root.id {
            return Err(Violation::ExtraRoot { id: node.id });
        }

        while stack.last().is_some_and(|open| open.rgt < node.lft) {
            stack.pop();
        }
        if let Some(parent) = stack.last() {
            if node.rgt >= parent.rgt {
                return Err(Violation::PartialOverlap {
                    id: node.id,
                    other: parent.id,
                });
            }
        }
        if node.level != stack.len() as i64 {
            return Err(Violation::WrongLevel {
                id: node.id,
                level: node.level,
                ancestors: stack.len(),
            });
        }

        stack.push(node);
        bounds.push(node.lft);
        bounds.push(node.rgt);
    }

    bounds.sort_unstable();
    let dense = bounds
        .iter()
        .enumerate()
        .all(|(i, bound)| *bound == i as i64 + 1);
    if !dense {
        return Err(Violation::SparseBounds {
            expected_max: 2 * count as i64,
        });
    }

    Ok(())
}
