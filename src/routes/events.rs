//! Read endpoints over stored events.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use maud::Markup;
use serde::Serialize;
use tracing::info;

use crate::error::{ListError, PageError, pretty_json};
use crate::event::StoredEvent;
use crate::render::{events_page, format_event_for_ui};
use crate::state::{AppState, RECENT_EVENTS_LIMIT};

#[derive(Debug, Clone, Serialize)]
pub struct EventMessage {
    pub message: String,
}

/// `GET /webhook/`
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Markup, PageError> {
    let events = state.store.query_recent(Some(RECENT_EVENTS_LIMIT)).await?;
    info!(count = events.len(), "retrieved events from database");

    let lines: Vec<String> = events
        .iter()
        .map(|stored| format_event_for_ui(&stored.document))
        .collect();
    Ok(events_page(&lines))
}

/// `GET /webhook/events`
pub async fn latest_events(State(state): State<Arc<AppState>>) -> Result<Response, ListError> {
    let events = state.store.query_recent(Some(RECENT_EVENTS_LIMIT)).await?;

    let messages: Vec<EventMessage> = events
        .iter()
        .map(|stored| EventMessage {
            message: format_event_for_ui(&stored.document),
        })
        .collect();
    Ok(pretty_json(StatusCode::OK, &messages))
}

/// `GET /webhook/debug/events`
///
/// Dumps every stored event, newest first, with its generated id.
pub async fn debug_events(State(state): State<Arc<AppState>>) -> Result<Response, ListError> {
    let events: Vec<StoredEvent> = state.store.query_recent(None).await?;
    Ok(pretty_json(StatusCode::OK, &events))
}
