//! Webhook ingestion.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, header};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::error::ReceiveError;
use crate::event::EventDocument;
use crate::normalize::{Outcome, normalize};
use crate::payload::{Payload, PayloadError};
use crate::render::format_event_for_ui;
use crate::state::AppState;

/// Header carrying the event kind (`push`, `pull_request`, ...).
pub const EVENT_HEADER: &str = "x-github-event";

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ReceiveResponse {
    Success { inserted_id: String },
    Ignored { message: String },
}

/// `POST /webhook/receiver`
pub async fn receive(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ReceiveResponse>, ReceiveError> {
    let content_type = header_str(&headers, header::CONTENT_TYPE.as_str());
    let event_type = header_str(&headers, EVENT_HEADER);
    info!(
        content_type = ?content_type,
        event_type = ?event_type,
        user_agent = ?header_str(&headers, header::USER_AGENT.as_str()),
        "webhook received"
    );

    if !content_type.is_some_and(is_json) {
        warn!(content_type = ?content_type, "invalid content type");
        return Err(ReceiveError::InvalidContentType);
    }

    let payload: Value = serde_json::from_slice(&body).map_err(|e| {
        error!(error = %e, "failed to parse webhook payload");
        ReceiveError::MalformedJson(e)
    })?;
    info!(keys = ?Payload::new(&payload).keys(), "payload parsed");

    let event = match normalize(event_type, &payload) {
        Ok(Outcome::Event(event)) => event,
        Ok(Outcome::Ignored(reason)) => {
            return Ok(Json(ReceiveResponse::Ignored {
                message: reason.to_string(),
            }));
        }
        Err(err) => {
            log_payload_error(&err, &payload);
            return Err(err.into());
        }
    };

    info!(event = ?event, "event data to insert");
    let inserted_id = state.store.insert(&event).await?;
    info!(id = %inserted_id, "inserted event");

    match state.store.find_by_id(&inserted_id).await {
        Ok(Some(stored)) => info!(stored = ?stored, "verified insertion"),
        Ok(None) => error!(id = %inserted_id, "failed to verify insertion"),
        Err(err) => error!(id = %inserted_id, error = %err, "failed to verify insertion"),
    }
    info!("{}", format_event_for_ui(&EventDocument::from(event)));

    Ok(Json(ReceiveResponse::Success { inserted_id }))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Media type check, ignoring parameters such as `charset`.
fn is_json(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
}

fn log_payload_error(err: &PayloadError, payload: &Value) {
    let full = serde_json::to_string_pretty(payload).unwrap_or_default();
    match err {
        PayloadError::MissingField(path) => {
            error!(field = %path, payload = %full, "missing key in payload");
        }
        PayloadError::InvalidField { path, expected } => {
            error!(field = %path, expected = %expected, payload = %full, "invalid value in payload");
        }
    }
}
