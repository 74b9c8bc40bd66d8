//! sqlitetree-server library exports (for testing)

pub mod api;
pub mod config;
pub mod error;
pub mod storage;
pub mod traits;
pub mod tree;

// Re-exports
pub use error::{ServerError, ServerResult};
pub use storage::SqliteStore;
pub use traits::{TreeStore, TreeTx};
pub use tree::{MutationEngine, Node, NodeId, Position, TreeCommand, TreeId, TreeProjections};
