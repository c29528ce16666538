//! In-memory event store, used when no database is configured and in tests.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{EventStore, Result};
use crate::event::{Event, EventDocument, StoredEvent};

#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    events: RwLock<Vec<StoredEvent>>,
}

impl InMemoryEventStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw document, e.g. one written by another producer.
    pub async fn insert_document(&self, document: EventDocument) -> String {
        let id = Uuid::new_v4().to_string();
        self.events.write().await.push(StoredEvent {
            id: id.clone(),
            document,
        });
        id
    }

    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn insert(&self, event: &Event) -> Result<String> {
        Ok(self.insert_document(EventDocument::from(event.clone())).await)
    }

    async fn query_recent(&self, limit: Option<usize>) -> Result<Vec<StoredEvent>> {
        // Newest insert first among equal timestamps, then a stable sort.
        // `None` < `Some`, so records without a timestamp end up last.
        let mut result: Vec<StoredEvent> =
            self.events.read().await.iter().rev().cloned().collect();
        result.sort_by(|a, b| b.document.timestamp.cmp(&a.document.timestamp));
        if let Some(limit) = limit {
            result.truncate(limit);
        }
        Ok(result)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<StoredEvent>> {
        let events = self.events.read().await;
        Ok(events.iter().find(|stored| stored.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Action;

    fn push(id: &str, timestamp: &str) -> Event {
        Event {
            request_id: id.to_string(),
            author: "alice".to_string(),
            action: Action::Push,
            from_branch: None,
            to_branch: "main".to_string(),
            timestamp: Some(timestamp.to_string()),
        }
    }

    #[tokio::test]
    async fn insert_and_find_by_id() {
        let store = InMemoryEventStore::new();
        let event = push("abc123", "2024-01-15T10:30:00Z");
        let id = store.insert(&event).await.unwrap();

        let stored = store.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.id, id);
        assert_eq!(stored.document, EventDocument::from(event));
        assert!(store.find_by_id("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn newest_first_with_limit() {
        let store = InMemoryEventStore::new();
        store.insert(&push("a", "2024-01-01T00:00:00Z")).await.unwrap();
        store.insert(&push("c", "2024-03-01T00:00:00Z")).await.unwrap();
        store.insert(&push("b", "2024-02-01T00:00:00Z")).await.unwrap();

        let recent = store.query_recent(Some(2)).await.unwrap();
        let ids: Vec<_> = recent
            .iter()
            .map(|s| s.document.request_id.as_deref().unwrap())
            .collect();
        assert_eq!(ids, ["c", "b"]);

        assert_eq!(store.query_recent(None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn missing_timestamps_sort_last() {
        let store = InMemoryEventStore::new();
        store
            .insert_document(EventDocument {
                request_id: Some("bare".to_string()),
                ..Default::default()
            })
            .await;
        store.insert(&push("a", "2024-01-01T00:00:00Z")).await.unwrap();

        let recent = store.query_recent(None).await.unwrap();
        assert_eq!(recent[0].document.request_id.as_deref(), Some("a"));
        assert_eq!(recent[1].document.request_id.as_deref(), Some("bare"));
    }

    #[tokio::test]
    async fn equal_timestamps_list_latest_insert_first() {
        let store = InMemoryEventStore::new();
        store.insert(&push("first", "2024-01-01T00:00:00Z")).await.unwrap();
        store.insert(&push("second", "2024-01-01T00:00:00Z")).await.unwrap();
        store.insert(&push("older", "2023-12-31T00:00:00Z")).await.unwrap();
        store.insert(&push("third", "2024-01-01T00:00:00Z")).await.unwrap();

        let recent = store.query_recent(None).await.unwrap();
        let ids: Vec<_> = recent
            .iter()
            .map(|s| s.document.request_id.as_deref().unwrap())
            .collect();
        assert_eq!(ids, ["third", "second", "first", "older"]);
    }

    #[tokio::test]
    async fn ids_are_unique() {
        let store = InMemoryEventStore::new();
        let event = push("same", "2024-01-01T00:00:00Z");
        let first = store.insert(&event).await.unwrap();
        let second = store.insert(&event).await.unwrap();
        assert_ne!(first, second);
        assert_eq!(store.len().await, 2);
    }
}
