// File: src/storage/sqlite/convert.rs

use crate::tree::model::Node;
use rusqlite::Row;

/// Column list matching [`row_to_node`]
pub const NODE_COLUMNS: &str = "id, tree_id, name, lft, rgt, level";

/// Convert a database row to Node
pub fn row_to_node(row: &Row) -> rusqlite::Result<Node> {
    Ok(Node {
        id: row.get(0)?,
        tree_id: row.get(1)?,
        name: row.get(2)?,
        lft: row.get(3)?,
        rgt: row.get(4)?,
        level: row.get(5)?,
    })
}
