//! `EventStore` trait and implementations.
//!
//! The store owns persisted events; handlers hold only a shared handle and
//! never cache records between requests.

mod memory;
mod postgres;

use std::sync::Arc;

use async_trait::async_trait;

use crate::event::{Event, StoredEvent};

pub use self::memory::InMemoryEventStore;
pub use self::postgres::PgEventStore;

/// Errors raised by a store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The backend rejected a write.
    #[error("store write failed: {0}")]
    Write(String),

    /// The backend answered but the read could not be completed.
    #[error("store read failed: {0}")]
    Read(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Persistence backend for normalized events.
///
/// Records are ordered by their stored `timestamp` string, compared
/// lexically, newest first. Records without a timestamp sort last.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Inserts one event, returning the generated id.
    async fn insert(&self, event: &Event) -> Result<String>;

    /// Returns up to `limit` events, newest first. `None` returns everything.
    async fn query_recent(&self, limit: Option<usize>) -> Result<Vec<StoredEvent>>;

    /// Looks up a single event by its generated id.
    async fn find_by_id(&self, id: &str) -> Result<Option<StoredEvent>>;
}

/// Shared handle to any event store.
pub type SharedEventStore = Arc<dyn EventStore>;
