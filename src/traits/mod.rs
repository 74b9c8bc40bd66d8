//! Trait definitions for tree storage

pub mod store;

pub use store::{Shift, TreeStore, TreeTx, TxBody};
