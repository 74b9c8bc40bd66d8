// File: src/storage/sqlite/config.rs

/// SQLite storage backend configuration
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// Path to database file (or ":memory:" for in-memory)
    pub path: String,

    /// Enable WAL mode so readers see a committed snapshot while a writer works
    pub wal_mode: bool,

    /// Busy timeout in milliseconds before a locked database reports SQLITE_BUSY
    pub busy_timeout_ms: u32,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            path: "tree.db".to_string(),
            wal_mode: true,
            busy_timeout_ms: 5000,
        }
    }
}

/// Storage statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageStats {
    /// Number of trees (distinct tree ids with at least one node)
    pub tree_count: u64,

    /// Total nodes across all trees
    pub node_count: u64,

    /// Database size in bytes (page_count * page_size)
    pub file_size: u64,
}
