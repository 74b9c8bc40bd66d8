//! Nested-set tree: bounds arithmetic, commands, engine and read views

pub mod bounds;
pub mod command;
pub mod engine;
pub mod model;
pub mod projection;
pub mod verify;

pub use command::{CommandOutcome, TreeCommand};
pub use engine::MutationEngine;
pub use model::{Node, NodeId, Position, TreeId};
pub use projection::{IndentedNode, TreeProjections};
pub use verify::VerifyReport;
