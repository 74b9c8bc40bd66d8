// File: src/storage/sqlite/nodes.rs

use super::convert::{self, NODE_COLUMNS};
use super::store::SqliteStore;
use crate::error::{ServerError, ServerResult, StorageError};
use crate::traits::{Shift, TreeTx};
use crate::tree::model::{NewNode, Node, NodeId, Span, TreeId};
use rusqlite::{params, Connection};

impl SqliteStore {
    /// Get a node by id
    pub(crate) fn get_node_impl(&self, id: NodeId) -> ServerResult<Node> {
        let conn = self.get_conn()?;
        find_node(&conn, id)?.ok_or(ServerError::NodeNotFound(id))
    }

    /// All nodes of one tree in preorder
    pub(crate) fn list_tree_impl(&self, tree_id: TreeId) -> ServerResult<Vec<Node>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {NODE_COLUMNS} FROM nodes WHERE tree_id = ?1 ORDER BY lft"
        ))?;

        let rows = stmt.query_map(params![tree_id], convert::row_to_node)?;
        rows.map(|r| r.map_err(|e| e.into())).collect()
    }

    /// All nodes of all trees in (tree_id, lft) order
    pub(crate) fn list_all_impl(&self) -> ServerResult<Vec<Node>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {NODE_COLUMNS} FROM nodes ORDER BY tree_id, lft"
        ))?;

        let rows = stmt.query_map([], convert::row_to_node)?;
        rows.map(|r| r.map_err(|e| e.into())).collect()
    }

    /// Root of every tree
    pub(crate) fn list_roots_impl(&self) -> ServerResult<Vec<Node>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {NODE_COLUMNS} FROM nodes WHERE level = 0 ORDER BY tree_id"
        ))?;

        let rows = stmt.query_map([], convert::row_to_node)?;
        rows.map(|r| r.map_err(|e| e.into())).collect()
    }
}

fn find_node(conn: &Connection, id: NodeId) -> ServerResult<Option<Node>> {
    let result = conn.query_row(
        &format!("SELECT {NODE_COLUMNS} FROM nodes WHERE id = ?1"),
        params![id],
        convert::row_to_node,
    );

    match result {
        Ok(node) => Ok(Some(node)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// [`TreeTx`] over an open SQLite transaction
pub(crate) struct SqliteTx<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteTx<'a> {
    pub(crate) fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl TreeTx for SqliteTx<'_> {
    fn find_node(&mut self, id: NodeId) -> ServerResult<Option<Node>> {
        find_node(self.conn, id)
    }

    fn apply_shift(&mut self, tree_id: TreeId, shift: Shift) -> ServerResult<u64> {
        let changed = match shift {
            Shift::Gap { from, delta } => self.conn.execute(
                "UPDATE nodes SET
                    lft = CASE WHEN lft >= ?2 THEN lft + ?3 ELSE lft END,
                    rgt = CASE WHEN rgt >= ?2 THEN rgt + ?3 ELSE rgt END
                 WHERE tree_id = ?1 AND rgt >= ?2",
                params![tree_id, from, delta],
            )?,
            Shift::Relocate {
                subtree,
                bound_shift,
                level_delta,
                displaced,
                displaced_shift,
            } => self.conn.execute(
                // Every CASE sees the pre-update row, so one statement moves the
                // subtree and slides the displaced bounds together.
                "UPDATE nodes SET
                    lft = CASE
                        WHEN lft BETWEEN ?2 AND ?3 THEN lft + ?4
                        WHEN lft BETWEEN ?6 AND ?7 THEN lft + ?8
                        ELSE lft END,
                    rgt = CASE
                        WHEN rgt BETWEEN ?2 AND ?3 THEN rgt + ?4
                        WHEN rgt BETWEEN ?6 AND ?7 THEN rgt + ?8
                        ELSE rgt END,
                    level = CASE
                        WHEN lft BETWEEN ?2 AND ?3 THEN level + ?5
                        ELSE level END
                 WHERE tree_id = ?1
                   AND (lft BETWEEN ?2 AND ?3 OR lft BETWEEN ?6 AND ?7 OR rgt BETWEEN ?6 AND ?7)",
                params![
                    tree_id,
                    subtree.start,
                    subtree.end,
                    bound_shift,
                    level_delta,
                    displaced.start,
                    displaced.end,
                    displaced_shift,
                ],
            )?,
        };

        tracing::trace!(tree_id, ?shift, changed, "Applied shift");
        Ok(changed as u64)
    }

    fn insert_node(&mut self, node: &NewNode) -> ServerResult<NodeId> {
        self.conn.execute(
            "INSERT INTO nodes (tree_id, name, lft, rgt, level) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![node.tree_id, node.name, node.lft, node.rgt, node.level],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn delete_span(&mut self, tree_id: TreeId, span: Span) -> ServerResult<u64> {
        let removed = self.conn.execute(
            "DELETE FROM nodes WHERE tree_id = ?1 AND lft BETWEEN ?2 AND ?3",
            params![tree_id, span.start, span.end],
        )?;
        Ok(removed as u64)
    }

    fn rename_node(&mut self, id: NodeId, name: &str) -> ServerResult<bool> {
        let changed = self.conn.execute(
            "UPDATE nodes SET name = ?2 WHERE id = ?1",
            params![id, name],
        )?;
        Ok(changed > 0)
    }

    fn allocate_tree_id(&mut self) -> ServerResult<TreeId> {
        let last: String = match self.conn.query_row(
            "SELECT value FROM tree_config WHERE key = 'last_tree_id'",
            [],
            |row| row.get(0),
        ) {
            Ok(value) => value,
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                return Err(ServerError::Storage(StorageError::NotInitialized))
            }
            Err(e) => return Err(e.into()),
        };
        let last: TreeId = last.parse().map_err(|_| {
            ServerError::Storage(StorageError::Corruption(format!(
                "invalid last_tree_id: {last}"
            )))
        })?;

        let next = last + 1;
        let now = chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0);
        self.conn.execute(
            "UPDATE tree_config SET value = ?1, updated_at = ?2 WHERE key = 'last_tree_id'",
            params![next.to_string(), now],
        )?;
        Ok(next)
    }
}
