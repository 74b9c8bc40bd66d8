// File: src/storage/sqlite/store.rs

use super::config::{SqliteConfig, StorageStats};
use super::nodes::SqliteTx;
use super::schema;
use crate::error::{ServerError, ServerResult, StorageError};
use crate::traits::{TreeStore, TxBody};
use crate::tree::command::CommandOutcome;
use crate::tree::model::{Node, NodeId, SubtreeBounds, TreeId};
use rusqlite::{Connection, TransactionBehavior};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// SQLite implementation of the TreeStore trait
///
/// One connection behind a mutex: writers and readers on this handle are
/// serialized, so a reader never sees a half-applied shift. Other handles on
/// the same file are excluded by SQLite's own write lock.
pub struct SqliteStore {
    /// Database connection (protected by mutex for thread safety)
    conn: Arc<Mutex<Connection>>,

    config: SqliteConfig,
}

impl SqliteStore {
    /// Create a new SqliteStore with default configuration
    ///
    /// Creates the database file if it doesn't exist. Call [`initialize`](Self::initialize)
    /// before use.
    pub fn new<P: AsRef<Path>>(path: P) -> ServerResult<Self> {
        let config = SqliteConfig {
            path: path.as_ref().to_string_lossy().to_string(),
            ..Default::default()
        };
        Self::with_config(config)
    }

    /// Create with custom configuration
    pub fn with_config(config: SqliteConfig) -> ServerResult<Self> {
        let conn = Connection::open(&config.path).map_err(|e| {
            ServerError::Storage(StorageError::ConnectionFailed(format!(
                "failed to open db: {}",
                e
            )))
        })?;

        Self::configure_connection(&conn, &config)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            config,
        })
    }

    /// Create an in-memory database (for testing)
    pub fn in_memory() -> ServerResult<Self> {
        let config = SqliteConfig {
            path: ":memory:".to_string(),
            ..Default::default()
        };
        Self::with_config(config)
    }

    /// Configure SQLite connection pragmas
    fn configure_connection(conn: &Connection, config: &SqliteConfig) -> ServerResult<()> {
        if config.wal_mode {
            conn.pragma_update(None, "journal_mode", "WAL")?;
        }
        conn.pragma_update(None, "busy_timeout", config.busy_timeout_ms)?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        Ok(())
    }

    /// Create the schema (idempotent)
    ///
    /// Called once at process start, before the store serves any request.
    pub fn initialize(&self) -> ServerResult<()> {
        let conn = self.get_conn()?;
        schema::create_tables(&conn)?;
        tracing::info!(
            path = %self.config.path,
            schema_version = schema::SCHEMA_VERSION,
            "Tree storage initialized"
        );
        Ok(())
    }

    /// Database path this store was opened with
    pub fn path(&self) -> &str {
        &self.config.path
    }

    /// Get database statistics
    pub fn stats(&self) -> ServerResult<StorageStats> {
        let conn = self.get_conn()?;

        let node_count: i64 = conn.query_row("SELECT COUNT(*) FROM nodes", [], |r| r.get(0))?;
        let tree_count: i64 =
            conn.query_row("SELECT COUNT(DISTINCT tree_id) FROM nodes", [], |r| r.get(0))?;
        let page_count: i64 = conn.query_row("PRAGMA page_count", [], |r| r.get(0))?;
        let page_size: i64 = conn.query_row("PRAGMA page_size", [], |r| r.get(0))?;

        Ok(StorageStats {
            tree_count: tree_count as u64,
            node_count: node_count as u64,
            file_size: (page_count * page_size) as u64,
        })
    }

    /// Get locked connection for internal operations
    pub(crate) fn get_conn(&self) -> ServerResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| {
            ServerError::Storage(StorageError::ConnectionFailed("lock poisoned".into()))
        })
    }
}

// TreeStore trait implementation
impl TreeStore for SqliteStore {
    fn get_node(&self, id: NodeId) -> ServerResult<Node> {
        self.get_node_impl(id)
    }

    fn get_subtree_bounds(&self, id: NodeId) -> ServerResult<SubtreeBounds> {
        self.get_node_impl(id).map(|node| SubtreeBounds::from(&node))
    }

    fn list_tree(&self, tree_id: TreeId) -> ServerResult<Vec<Node>> {
        self.list_tree_impl(tree_id)
    }

    fn list_all(&self) -> ServerResult<Vec<Node>> {
        self.list_all_impl()
    }

    fn list_roots(&self) -> ServerResult<Vec<Node>> {
        self.list_roots_impl()
    }

    fn is_initialized(&self) -> bool {
        self.get_conn()
            .map(|conn| schema::schema_version(&conn).is_some())
            .unwrap_or(false)
    }

    fn write(&self, body: &mut TxBody<'_>) -> ServerResult<CommandOutcome> {
        let mut conn = self.get_conn()?;
        // IMMEDIATE takes the write lock up front, so the bounds read inside
        // `body` cannot change before the shift is applied.
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        // Dropping `tx` on an early return rolls everything back
        let outcome = {
            let mut handle = SqliteTx::new(&tx);
            body(&mut handle)?
        };

        tx.commit().map_err(|e| match ServerError::from(e) {
            ServerError::Storage(StorageError::Sqlite(e)) => {
                ServerError::Storage(StorageError::TransactionFailed(e.to_string()))
            }
            other => other,
        })?;

        Ok(outcome)
    }
}
