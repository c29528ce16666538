//! Shared application state.

use std::sync::Arc;

use crate::store::{InMemoryEventStore, SharedEventStore};

/// Number of events shown by the listing endpoints.
pub const RECENT_EVENTS_LIMIT: usize = 10;

/// State handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedEventStore,
}

impl AppState {
    pub fn new(store: SharedEventStore) -> Self {
        Self { store }
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryEventStore::new()))
    }
}
