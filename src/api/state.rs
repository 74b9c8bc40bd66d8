//! Application state shared across HTTP handlers

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::traits::TreeStore;
use crate::tree::{MutationEngine, TreeProjections};

/// Application state shared across handlers
///
/// Mutations go through `engine`, reads through `projections`; both share
/// one store.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<MutationEngine>,
    pub projections: TreeProjections,
    pub store: Arc<dyn TreeStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn TreeStore>, config: EngineConfig) -> Self {
        Self {
            engine: Arc::new(MutationEngine::with_config(store.clone(), config)),
            projections: TreeProjections::new(store.clone()),
            store,
        }
    }
}
