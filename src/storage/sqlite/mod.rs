// File: src/storage/sqlite/mod.rs

mod config;
mod convert;
mod nodes;
mod schema;
mod store;

// Public exports
pub use config::{SqliteConfig, StorageStats};
pub use schema::SCHEMA_VERSION;
pub use store::SqliteStore;
