//! Tree storage trait definitions

use crate::error::ServerResult;
use crate::tree::command::CommandOutcome;
use crate::tree::model::{NewNode, Node, NodeId, Span, SubtreeBounds, TreeId};

/// Bound renumbering applied to every matching node of one tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shift {
    /// Every bound `>= from` moves by `delta` (opens or closes a gap)
    Gap { from: i64, delta: i64 },

    /// Moves a subtree and slides the bounds it jumps over
    ///
    /// All bounds are matched against their pre-update values.
    Relocate {
        /// Bound range of the subtree being moved
        subtree: Span,
        /// Added to bounds inside `subtree`
        bound_shift: i64,
        /// Added to `level` of nodes whose `lft` is inside `subtree`
        level_delta: i64,
        /// Bounds between the old and new location
        displaced: Span,
        /// Added to bounds inside `displaced`
        displaced_shift: i64,
    },
}

/// Operations available inside one write transaction
///
/// Nothing done through a `TreeTx` is visible to readers until the enclosing
/// [`TreeStore::write`] commits.
pub trait TreeTx {
    /// Look up a node, `None` if it does not exist
    fn find_node(&mut self, id: NodeId) -> ServerResult<Option<Node>>;

    /// Apply a shift to every matching node of `tree_id`, returns rows touched
    fn apply_shift(&mut self, tree_id: TreeId, shift: Shift) -> ServerResult<u64>;

    /// Insert a node and return its id
    fn insert_node(&mut self, node: &NewNode) -> ServerResult<NodeId>;

    /// Delete every node of `tree_id` whose `lft` is inside `span`, returns rows removed
    fn delete_span(&mut self, tree_id: TreeId, span: Span) -> ServerResult<u64>;

    /// Change a node's name, returns false if it does not exist
    fn rename_node(&mut self, id: NodeId, name: &str) -> ServerResult<bool>;

    /// Reserve a fresh tree id
    fn allocate_tree_id(&mut self) -> ServerResult<TreeId>;
}

/// Body of a write transaction
pub type TxBody<'a> = dyn FnMut(&mut dyn TreeTx) -> ServerResult<CommandOutcome> + 'a;

/// Durable node storage
pub trait TreeStore: Send + Sync {
    /// Get a node by id
    fn get_node(&self, id: NodeId) -> ServerResult<Node>;

    /// Get a node's bounds and tree
    fn get_subtree_bounds(&self, id: NodeId) -> ServerResult<SubtreeBounds>;

    /// All nodes of one tree ordered by `lft`
    fn list_tree(&self, tree_id: TreeId) -> ServerResult<Vec<Node>>;

    /// All nodes ordered by `(tree_id, lft)`
    fn list_all(&self) -> ServerResult<Vec<Node>>;

    /// Root nodes ordered by `tree_id`
    fn list_roots(&self) -> ServerResult<Vec<Node>>;

    /// Check that the store is reachable and initialized
    fn is_initialized(&self) -> bool;

    /// Run `body` in one write transaction
    ///
    /// Commits if `body` returns `Ok`, rolls back everything it did otherwise.
    fn write(&self, body: &mut TxBody<'_>) -> ServerResult<CommandOutcome>;
}
