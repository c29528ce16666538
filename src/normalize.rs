//! Mapping of raw webhook payloads onto [`Event`] records.

use std::fmt;

use serde_json::Value;
use tracing::{info, warn};

use crate::event::{Action, Event};
use crate::payload::{Payload, PayloadError};

/// Result of normalizing a payload that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The payload produced an event that should be stored.
    Event(Event),
    /// The payload was understood but carries nothing to store.
    Ignored(IgnoreReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// A push without `head_commit` (e.g. a branch deletion).
    NoHeadCommit,
    /// Any event kind other than push or pull request.
    UnhandledKind(Option<String>),
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoHeadCommit => f.write_str("No head_commit"),
            Self::UnhandledKind(_) => f.write_str("Event type not handled"),
        }
    }
}

/// Normalizes `payload` according to the event kind announced out of band.
pub fn normalize(kind: Option<&str>, payload: &Value) -> Result<Outcome, PayloadError> {
    let payload = Payload::new(payload);
    match kind {
        Some("push") => normalize_push(payload),
        Some("pull_request") => normalize_pull_request(payload).map(Outcome::Event),
        other => {
            info!(event_type = ?other, "ignoring event type");
            Ok(Outcome::Ignored(IgnoreReason::UnhandledKind(
                other.map(str::to_string),
            )))
        }
    }
}

fn normalize_push(payload: Payload<'_>) -> Result<Outcome, PayloadError> {
    if !payload.is_truthy("head_commit") {
        warn!("no head_commit in push event");
        return Ok(Outcome::Ignored(IgnoreReason::NoHeadCommit));
    }

    let request_id = non_empty(&payload, "head_commit.id")?;
    let author = payload.required_string("pusher.name")?;
    let git_ref = payload.required_string("ref")?;
    let timestamp = payload.required_string("head_commit.timestamp")?;

    Ok(Outcome::Event(Event {
        request_id,
        author,
        action: Action::Push,
        from_branch: None,
        to_branch: branch_name(&git_ref).to_string(),
        timestamp: Some(timestamp),
    }))
}

fn normalize_pull_request(payload: Payload<'_>) -> Result<Event, PayloadError> {
    payload.required("pull_request")?;

    let pr_action = payload.optional_str("action");
    let merged = payload.is_truthy("pull_request.merged");
    info!(
        pr_action = ?pr_action,
        merged,
        state = ?payload.optional_str("pull_request.state"),
        "pull request event"
    );

    let (action, primary) = if pr_action == Some("closed") && merged {
        (Action::Merge, "pull_request.merged_at")
    } else {
        (Action::PullRequest, "pull_request.created_at")
    };

    let timestamp = payload.optional_str(primary).or_else(|| {
        warn!(pr_action = ?pr_action, source = primary, "no timestamp, falling back");
        payload
            .optional_str("pull_request.updated_at")
            .or_else(|| payload.optional_str("pull_request.created_at"))
    });

    Ok(Event {
        request_id: non_empty(&payload, "pull_request.number")?,
        author: payload.required_string("pull_request.user.login")?,
        action,
        from_branch: Some(payload.required_string("pull_request.head.ref")?),
        to_branch: payload.required_string("pull_request.base.ref")?,
        timestamp: timestamp.map(str::to_string),
    })
}

fn non_empty(payload: &Payload<'_>, path: &str) -> Result<String, PayloadError> {
    let value = payload.required_string(path)?;
    if value.is_empty() {
        return Err(PayloadError::MissingField(path.to_string()));
    }
    Ok(value)
}

/// Last `/`-separated segment of a git ref, e.g. `refs/heads/main` -> `main`.
fn branch_name(git_ref: &str) -> &str {
    git_ref.rsplit('/').next().unwrap_or(git_ref)
}
