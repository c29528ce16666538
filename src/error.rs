//! HTTP error types and response formatting.

use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::payload::PayloadError;
use crate::store::StoreError;

/// Failure while receiving a webhook.
#[derive(Debug, thiserror::Error)]
pub enum ReceiveError {
    /// Body was not declared as JSON.
    #[error("Invalid Content-Type")]
    InvalidContentType,

    /// Body could not be parsed as JSON.
    #[error("Malformed JSON payload: {0}")]
    MalformedJson(#[from] serde_json::Error),

    /// A recognized payload lacked a required field.
    #[error(transparent)]
    Payload(#[from] PayloadError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ReceiveError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidContentType | Self::MalformedJson(_) | Self::Payload(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message returned to the sender.
    pub fn message(&self) -> String {
        match self {
            Self::Payload(PayloadError::MissingField(path)) => format!("Missing key: {path}"),
            Self::Payload(PayloadError::InvalidField { path, expected }) => {
                format!("Invalid value for key: {path} (expected {expected})")
            }
            other => other.to_string(),
        }
    }
}

/// `{"status": "error", "message": ...}` body.
#[derive(Debug, Clone, Serialize)]
struct ErrorStatus {
    status: &'static str,
    message: String,
}

impl IntoResponse for ReceiveError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "unexpected error");
        }

        let body = ErrorStatus {
            status: "error",
            message: self.message(),
        };
        (status, Json(body)).into_response()
    }
}

/// Store failure on the HTML listing; rendered as plain text.
#[derive(Debug, thiserror::Error)]
#[error("Database error: {0}")]
pub struct PageError(#[from] pub StoreError);

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "database error in index");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}

/// Store failure on a JSON listing; rendered as `{"error": ...}`.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ListError(#[from] pub StoreError);

#[derive(Debug, Clone, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ListError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "error getting events");
        pretty_json(
            StatusCode::INTERNAL_SERVER_ERROR,
            &ErrorBody {
                error: self.0.to_string(),
            },
        )
    }
}

/// Pretty-printed JSON response with an explicit status.
pub fn pretty_json<T: Serialize>(status: StatusCode, value: &T) -> Response {
    match serde_json::to_string_pretty(value) {
        Ok(body) => (status, [(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "serialization error");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}
