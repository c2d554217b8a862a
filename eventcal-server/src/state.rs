use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Result;
use eventcal_core::EventStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    // rusqlite connections are not Sync; handlers take the lock briefly and
    // never across an await
    store: Arc<Mutex<EventStore>>,
}

impl AppState {
    pub fn new(store: EventStore) -> Self {
        AppState {
            store: Arc::new(Mutex::new(store)),
        }
    }

    pub fn store(&self) -> Result<MutexGuard<'_, EventStore>> {
        self.store
            .lock()
            .map_err(|_| anyhow::anyhow!("Event store lock poisoned"))
    }
}
