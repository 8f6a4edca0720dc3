use std::sync::Arc;

use gatelogue_client::{Snapshot, SnapshotStore};

use crate::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SnapshotStore>,
}

impl AppState {
    pub fn new(store: SnapshotStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// The snapshot a request works against. Held for the whole request so
    /// that a concurrent refresh cannot change what it sees.
    pub fn snapshot(&self) -> Result<Arc<Snapshot>, ApiError> {
        self.store.current().ok_or(ApiError::NotLoaded)
    }
}
