//! Hookfeed - repository webhook receiver and activity feed.
//!
//! Push and pull-request webhooks are normalized into a common [`Event`]
//! record, persisted through an [`EventStore`], and listed back as
//! human-readable lines (HTML or JSON).
//!
//! # Architecture
//!
//! - **normalize**: payload -> [`Event`], no I/O
//! - **timestamp** / **render**: display formatting
//! - **store**: persistence trait with in-memory and Postgres backends
//! - **routes**: axum handlers composing the above

pub mod config;
mod error;
pub mod event;
pub mod normalize;
pub mod payload;
pub mod render;
mod routes;
mod state;
pub mod store;
pub mod timestamp;

pub use self::config::Config;
pub use self::error::{ListError, PageError, ReceiveError};
pub use self::event::{Action, Event, EventDocument, StoredEvent};
pub use self::routes::{EVENT_HEADER, router};
pub use self::state::{AppState, RECENT_EVENTS_LIMIT};
pub use self::store::{EventStore, InMemoryEventStore, PgEventStore, SharedEventStore, StoreError};
