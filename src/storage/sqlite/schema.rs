// File: src/storage/sqlite/schema.rs

use crate::error::ServerResult;
use rusqlite::{params, Connection};

/// Current schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Create all tables and seed counters (idempotent)
pub fn create_tables(conn: &Connection) -> ServerResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;

    let now = chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0);
    conn.execute(
        "INSERT OR IGNORE INTO tree_config (key, value, updated_at) VALUES ('last_tree_id', '0', ?1)",
        params![now],
    )?;
    conn.execute(
        "INSERT OR REPLACE INTO tree_config (key, value, updated_at) VALUES ('schema_version', ?1, ?2)",
        params![SCHEMA_VERSION.to_string(), now],
    )?;

    Ok(())
}

/// Read the stored schema version, `None` if the schema was never created
pub fn schema_version(conn: &Connection) -> Option<u32> {
    conn.query_row(
        "SELECT value FROM tree_config WHERE key = 'schema_version'",
        [],
        |row| row.get::<_, String>(0),
    )
    .ok()
    .and_then(|s| s.parse().ok())
}

const SCHEMA_SQL: &str = r#"
-- Key/value settings and counters
CREATE TABLE IF NOT EXISTS tree_config (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL
);

-- Nested-set nodes, one row per node of every tree
CREATE TABLE IF NOT EXISTS nodes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,   -- never reused, so retries see a missing id
    tree_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    lft INTEGER NOT NULL,
    rgt INTEGER NOT NULL,
    level INTEGER NOT NULL,
    CHECK (lft < rgt),
    CHECK (level >= 0)
);

-- Not UNIQUE: a shift rewrites bounds row by row and may pass through duplicates
CREATE INDEX IF NOT EXISTS idx_nodes_tree_lft ON nodes(tree_id, lft);
CREATE INDEX IF NOT EXISTS idx_nodes_tree_rgt ON nodes(tree_id, rgt);
CREATE INDEX IF NOT EXISTS idx_nodes_level ON nodes(level);
"#;
