//! Route definitions.
//!
//! ## Routes
//!
//! - `GET /` - Service description
//! - `GET /health` - Health check
//! - `GET /webhook/` - Recent events as an HTML page
//! - `GET /webhook/events` - Recent events as JSON messages
//! - `POST /webhook/receiver` - Webhook ingestion
//! - `GET /webhook/debug/events` - Every stored event with all fields

mod events;
mod health;
mod receiver;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

pub use self::receiver::EVENT_HEADER;

/// Build the complete router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health::service_info))
        .route("/health", get(health::health_check))
        .route("/webhook", get(events::index))
        .route("/webhook/", get(events::index))
        .route("/webhook/events", get(events::latest_events))
        .route("/webhook/receiver", post(receiver::receive))
        .route("/webhook/debug/events", get(events::debug_events))
        .with_state(state)
}
