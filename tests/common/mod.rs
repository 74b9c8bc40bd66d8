//! Common test utilities and fixtures
//!
//! Shared by the API and storage integration suites:
//! - Test app setup with in-memory storage
//! - JSON request/response helpers
//! - Tree shape assertions

#![allow(dead_code, unused_imports)]

pub mod fixtures;

// Re-export commonly used items
pub use fixtures::*;

// Re-export frequently used external types for convenience
pub use axum::body::Body;
pub use axum::http::{Request, StatusCode};
pub use std::sync::Arc;
pub use tower::ServiceExt;
