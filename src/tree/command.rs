//! Mutation commands accepted by the engine

use serde::Serialize;

use super::model::{NodeId, Position, TreeId};
use crate::error::{ServerError, ServerResult};

/// One tree mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeCommand {
    /// Start a new tree with a single root
    CreateRoot { name: String },

    /// Insert a leaf relative to `target`
    InsertNode {
        target: NodeId,
        name: String,
        position: Position,
    },

    /// Move the subtree rooted at `node` relative to `target`
    MoveNode {
        node: NodeId,
        target: NodeId,
        position: Position,
    },

    /// Delete `node` and all its descendants
    DeleteNode { node: NodeId },

    /// Change a node's label
    RenameNode { node: NodeId, name: String },
}

impl TreeCommand {
    /// Short name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            TreeCommand::CreateRoot { .. } => "create_root",
            TreeCommand::InsertNode { .. } => "insert_node",
            TreeCommand::MoveNode { .. } => "move_node",
            TreeCommand::DeleteNode { .. } => "delete_node",
            TreeCommand::RenameNode { .. } => "rename_node",
        }
    }

    /// Checks that need no storage access
    ///
    /// Runs before any transaction is opened, so a failure here has no side effect.
    pub fn validate(&self) -> ServerResult<()> {
        match self {
            TreeCommand::CreateRoot { name }
            | TreeCommand::InsertNode { name, .. }
            | TreeCommand::RenameNode { name, .. } => validate_name(name),
            TreeCommand::MoveNode { node, target, .. } if node == target => {
                Err(ServerError::CyclicMove {
                    node: *node,
                    target: *target,
                })
            }
            TreeCommand::MoveNode { .. } | TreeCommand::DeleteNode { .. } => Ok(()),
        }
    }
}

fn validate_name(name: &str) -> ServerResult<()> {
    if name.trim().is_empty() {
        return Err(ServerError::InvalidInput("name must not be empty".into()));
    }
    Ok(())
}

/// What a successful command produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum CommandOutcome {
    /// A new tree and its root
    RootCreated { tree_id: TreeId, node_id: NodeId },

    /// A new node in an existing tree
    NodeCreated { node_id: NodeId },

    /// Mutation applied, nothing created
    Applied,
}

impl CommandOutcome {
    /// Id of the created node, if any
    pub fn created_id(&self) -> Option<NodeId> {
        match self {
            CommandOutcome::RootCreated { node_id, .. } | CommandOutcome::NodeCreated { node_id } => {
                Some(*node_id)
            }
            CommandOutcome::Applied => None,
        }
    }
}
