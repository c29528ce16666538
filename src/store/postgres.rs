//! Postgres-backed event store.
//!
//! A single table is used as a document collection: each row holds the
//! generated id and the event as a JSONB document.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use uuid::Uuid;

use super::{EventStore, Result, StoreError};
use crate::event::{Event, EventDocument, StoredEvent};

#[derive(Debug, Clone)]
pub struct PgEventStore {
    pool: PgPool,
    table: String,
}

impl PgEventStore {
    /// Connects to `database_url` and makes sure the collection table exists.
    pub async fn connect(database_url: &str, table: &str, max_connections: u32) -> Result<Self> {
        if !is_identifier(table) {
            return Err(StoreError::Unavailable(format!(
                "invalid collection name: {table:?}"
            )));
        }

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let store = Self {
            pool,
            table: table.to_string(),
        };
        store.ensure_schema().await?;
        tracing::info!(table = %store.table, "event store connected");
        Ok(store)
    }

    async fn ensure_schema(&self) -> Result<()> {
        let create = format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                id UUID PRIMARY KEY,
                document JSONB NOT NULL,
                inserted_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
            table = self.table
        );
        let index = format!(
            "CREATE INDEX IF NOT EXISTS {table}_timestamp_idx
                ON {table} ((document->>'timestamp') COLLATE \"C\" DESC NULLS LAST)",
            table = self.table
        );

        for statement in [create, index] {
            sqlx::query(&statement)
                .execute(&self.pool)
                .await
                .map_err(|e| classify(e, StoreError::Write))?;
        }
        Ok(())
    }
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn insert(&self, event: &Event) -> Result<String> {
        let id = Uuid::new_v4();
        sqlx::query(&format!(
            "INSERT INTO {} (id, document) VALUES ($1, $2)",
            self.table
        ))
        .bind(id)
        .bind(Json(event))
        .execute(&self.pool)
        .await
        .map_err(|e| classify(e, StoreError::Write))?;

        Ok(id.to_string())
    }

    async fn query_recent(&self, limit: Option<usize>) -> Result<Vec<StoredEvent>> {
        // LIMIT NULL means no limit.
        let limit = limit.map(|n| i64::try_from(n).unwrap_or(i64::MAX));
        let rows: Vec<(Uuid, Json<EventDocument>)> = sqlx::query_as(&format!(
            "SELECT id, document FROM {}
             ORDER BY document->>'timestamp' COLLATE \"C\" DESC NULLS LAST, inserted_at DESC
             LIMIT $1",
            self.table
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| classify(e, StoreError::Read))?;

        Ok(rows.into_iter().map(into_stored).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<StoredEvent>> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };
        let row: Option<(Uuid, Json<EventDocument>)> = sqlx::query_as(&format!(
            "SELECT id, document FROM {} WHERE id = $1",
            self.table
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify(e, StoreError::Read))?;

        Ok(row.map(into_stored))
    }
}

fn into_stored((id, Json(document)): (Uuid, Json<EventDocument>)) -> StoredEvent {
    StoredEvent {
        id: id.to_string(),
        document,
    }
}

/// Connectivity problems become `Unavailable`; anything else is wrapped with `otherwise`.
fn classify(err: sqlx::Error, otherwise: fn(String) -> StoreError) -> StoreError {
    match &err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => StoreError::Unavailable(err.to_string()),
        _ => otherwise(err.to_string()),
    }
}

/// Plain SQL identifier: ASCII letters, digits and underscores, not starting with a digit.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_names() {
        assert!(is_identifier("events"));
        assert!(is_identifier("_github_events2"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("2events"));
        assert!(!is_identifier("events; DROP TABLE x"));
        assert!(!is_identifier("public.events"));
    }

    #[test]
    fn connectivity_errors_are_unavailable() {
        assert!(matches!(
            classify(sqlx::Error::PoolTimedOut, StoreError::Write),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            classify(sqlx::Error::RowNotFound, StoreError::Write),
            StoreError::Write(_)
        ));
        assert!(matches!(
            classify(sqlx::Error::RowNotFound, StoreError::Read),
            StoreError::Read(_)
        ));
    }

    #[tokio::test]
    async fn rejects_bad_collection_before_connecting() {
        let err = PgEventStore::connect("postgres://localhost/unused", "bad name", 1)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("invalid collection name"));
    }
}
