use crate::server::relationship::RelationshipService;
use crate::state::store::Store;
use std::sync::Arc;

/// Shared application state, one per process.
#[derive(Clone)]
pub struct State {
    pub relationships: RelationshipService,
}

impl State {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            relationships: RelationshipService::new(store),
        }
    }

    /// Closes the storage handle.
    pub async fn close(&self) {
        self.relationships.store().disconnect().await;
    }
}
