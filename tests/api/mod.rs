//! API integration tests
//!
//! Tests for HTTP endpoints:
//! - GET /health
//! - /api/tree and /api/trees projections, tree creation
//! - /api/nodes mutations and error mapping
//! - /api/trees/:tree_id/nodes scoped mutations

pub mod health_test;
pub mod nodes_test;
pub mod tree_nodes_test;
