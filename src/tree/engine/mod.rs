//! Mutation engine: applies tree commands atomically
//!
//! Every command follows the same path: validate (no storage access), then
//! inside one store transaction load the bounds it needs, plan with
//! [`bounds`](crate::tree::bounds), and apply the plan. A transaction that
//! loses a lock race is retried a bounded number of times.

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::error::{ServerError, ServerResult, StorageError};
use crate::traits::{Shift, TreeStore, TreeTx};
use crate::tree::bounds::{self, PlanError};
use crate::tree::command::{CommandOutcome, TreeCommand};
use crate::tree::model::{Bounds, NewNode, Node, NodeId, Position, TreeId};

/// Applies [`TreeCommand`]s to a [`TreeStore`]
pub struct MutationEngine {
    store: Arc<dyn TreeStore>,
    config: EngineConfig,
}

impl MutationEngine {
    /// Create an engine with default retry settings
    pub fn new(store: Arc<dyn TreeStore>) -> Self {
        Self::with_config(store, EngineConfig::default())
    }

    /// Create with custom configuration
    pub fn with_config(store: Arc<dyn TreeStore>, config: EngineConfig) -> Self {
        Self { store, config }
    }

    /// Apply one command
    pub fn apply(&self, command: &TreeCommand) -> ServerResult<CommandOutcome> {
        self.run(command, None)
    }

    /// Apply one command whose nodes must all belong to `tree_id`
    ///
    /// A node from another tree fails with `InvalidTarget` before anything is
    /// written. Renames do not load the node and are not scoped.
    pub fn apply_in_tree(
        &self,
        tree_id: TreeId,
        command: &TreeCommand,
    ) -> ServerResult<CommandOutcome> {
        self.run(command, Some(tree_id))
    }

    fn run(&self, command: &TreeCommand, scope: Option<TreeId>) -> ServerResult<CommandOutcome> {
        command.validate()?;

        let max_attempts = self.config.max_attempts();
        let mut attempt = 1;

        loop {
            let result = self
                .store
                .write(&mut |tx: &mut dyn TreeTx| execute(tx, command, scope));

            match result {
                Ok(outcome) => {
                    tracing::info!(
                        command = command.kind(),
                        ?outcome,
                        attempt,
                        "Applied tree command"
                    );
                    return Ok(outcome);
                }
                Err(ServerError::ConcurrencyConflict(reason)) if attempt < max_attempts => {
                    tracing::warn!(
                        command = command.kind(),
                        attempt,
                        max_attempts,
                        %reason,
                        "Concurrency conflict, retrying"
                    );
                    let backoff = self.config.backoff(attempt);
                    if !backoff.is_zero() {
                        std::thread::sleep(backoff);
                    }
                    attempt += 1;
                }
                Err(e) => {
                    tracing::debug!(command = command.kind(), error = %e, "Tree command rejected");
                    return Err(e);
                }
            }
        }
    }

    /// Create a new tree, returns `(tree_id, root_id)`
    pub fn create_root(&self, name: &str) -> ServerResult<(TreeId, NodeId)> {
        match self.apply(&TreeCommand::CreateRoot { name: name.into() })? {
            CommandOutcome::RootCreated { tree_id, node_id } => Ok((tree_id, node_id)),
            other => Err(unexpected(other)),
        }
    }

    /// Insert a leaf relative to `target`, returns the new node id
    pub fn insert_node(
        &self,
        target: NodeId,
        name: &str,
        position: Position,
    ) -> ServerResult<NodeId> {
        let outcome = self.apply(&TreeCommand::InsertNode {
            target,
            name: name.into(),
            position,
        })?;
        outcome.created_id().ok_or_else(|| unexpected(outcome))
    }

    /// Insert a leaf relative to `target`, which must be a node of `tree_id`
    pub fn insert_node_in_tree(
        &self,
        tree_id: TreeId,
        target: NodeId,
        name: &str,
        position: Position,
    ) -> ServerResult<NodeId> {
        let command = TreeCommand::InsertNode {
            target,
            name: name.into(),
            position,
        };
        let outcome = self.apply_in_tree(tree_id, &command)?;
        outcome.created_id().ok_or_else(|| unexpected(outcome))
    }

    /// Move the subtree rooted at `node` relative to `target`
    pub fn move_node(&self, node: NodeId, target: NodeId, position: Position) -> ServerResult<()> {
        self.apply(&TreeCommand::MoveNode {
            node,
            target,
            position,
        })
        .map(|_| ())
    }

    /// Move within `tree_id`; both `node` and `target` must belong to it
    pub fn move_node_in_tree(
        &self,
        tree_id: TreeId,
        node: NodeId,
        target: NodeId,
        position: Position,
    ) -> ServerResult<()> {
        let command = TreeCommand::MoveNode {
            node,
            target,
            position,
        };
        self.apply_in_tree(tree_id, &command).map(|_| ())
    }

    /// Delete `node` and its whole subtree
    pub fn delete_node(&self, node: NodeId) -> ServerResult<()> {
        self.apply(&TreeCommand::DeleteNode { node }).map(|_| ())
    }

    /// Rename `node`
    pub fn rename_node(&self, node: NodeId, name: &str) -> ServerResult<()> {
        self.apply(&TreeCommand::RenameNode {
            node,
            name: name.into(),
        })
        .map(|_| ())
    }
}

fn unexpected(outcome: CommandOutcome) -> ServerError {
    ServerError::Internal(format!("unexpected command outcome: {:?}", outcome))
}

/// Run one command inside an open transaction
fn execute(
    tx: &mut dyn TreeTx,
    command: &TreeCommand,
    scope: Option<TreeId>,
) -> ServerResult<CommandOutcome> {
    match command {
        TreeCommand::CreateRoot { name } => {
            let tree_id = tx.allocate_tree_id()?;
            let node_id = tx.insert_node(&new_node(tree_id, name, Bounds::ROOT))?;
            Ok(CommandOutcome::RootCreated { tree_id, node_id })
        }

        TreeCommand::InsertNode {
            target,
            name,
            position,
        } => {
            let target = load_target(tx, *target)?;
            check_scope(&target, scope)?;
            let plan = bounds::plan_insert(target.bounds(), *position)
                .map_err(|e| plan_error(e, target.id, target.id))?;

            tx.apply_shift(
                target.tree_id,
                Shift::Gap {
                    from: plan.shift_from,
                    delta: plan.shift,
                },
            )?;
            let node_id = tx.insert_node(&new_node(target.tree_id, name, plan.node))?;
            Ok(CommandOutcome::NodeCreated { node_id })
        }

        TreeCommand::MoveNode {
            node,
            target,
            position,
        } => {
            let source = load_target(tx, *node)?;
            let dest = load_target(tx, *target)?;
            check_scope(&source, scope)?;
            check_scope(&dest, scope)?;
            if source.tree_id != dest.tree_id {
                return Err(ServerError::InvalidTarget(format!(
                    "node {} is in tree {} but target {} is in tree {}",
                    source.id, source.tree_id, dest.id, dest.tree_id
                )));
            }

            let plan = bounds::plan_move(source.bounds(), dest.bounds(), *position)
                .map_err(|e| plan_error(e, source.id, dest.id))?;

            if !plan.is_noop() {
                tx.apply_shift(
                    source.tree_id,
                    Shift::Relocate {
                        subtree: plan.source,
                        bound_shift: plan.bound_shift,
                        level_delta: plan.level_delta,
                        displaced: plan.displaced,
                        displaced_shift: plan.displaced_shift(),
                    },
                )?;
            }
            Ok(CommandOutcome::Applied)
        }

        TreeCommand::DeleteNode { node } => {
            let node = load_target(tx, *node)?;
            check_scope(&node, scope)?;
            let plan = bounds::plan_delete(node.bounds());

            let removed = tx.delete_span(node.tree_id, plan.removed)?;
            let expected = (node.descendant_count() + 1) as u64;
            if removed != expected {
                return Err(ServerError::Storage(StorageError::Corruption(format!(
                    "deleting node {} removed {} rows, bounds imply {}",
                    node.id, removed, expected
                ))));
            }

            tx.apply_shift(
                node.tree_id,
                Shift::Gap {
                    from: plan.shift_from,
                    delta: plan.removal_shift,
                },
            )?;
            Ok(CommandOutcome::Applied)
        }

        TreeCommand::RenameNode { node, name } => {
            if !tx.rename_node(*node, name)? {
                return Err(missing(*node));
            }
            Ok(CommandOutcome::Applied)
        }
    }
}

fn new_node(tree_id: TreeId, name: &str, bounds: Bounds) -> NewNode {
    NewNode {
        tree_id,
        name: name.to_string(),
        lft: bounds.lft,
        rgt: bounds.rgt,
        level: bounds.level,
    }
}

fn load_target(tx: &mut dyn TreeTx, id: NodeId) -> ServerResult<Node> {
    tx.find_node(id)?.ok_or_else(|| missing(id))
}

fn check_scope(node: &Node, scope: Option<TreeId>) -> ServerResult<()> {
    match scope {
        Some(tree_id) if node.tree_id != tree_id => Err(ServerError::InvalidTarget(format!(
            "node {} is not in tree {}",
            node.id, tree_id
        ))),
        _ => Ok(()),
    }
}

fn missing(id: NodeId) -> ServerError {
    ServerError::InvalidTarget(format!("node {} does not exist", id))
}

fn plan_error(e: PlanError, node: NodeId, target: NodeId) -> ServerError {
    match e {
        PlanError::Cyclic => ServerError::CyclicMove { node, target },
        PlanError::RootSibling => ServerError::InvalidTarget(format!(
            "node {} is a root and cannot have siblings",
            target
        )),
    }
}
