//! Canonical event records.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// What happened in the repository.
///
/// Records written by this service only ever carry `Push`, `PullRequest` or
/// `Merge`. `Other` keeps foreign values found in the store intact so they can
/// still be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Action {
    Push,
    PullRequest,
    Merge,
    Other(String),
}

impl Action {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Push => "PUSH",
            Self::PullRequest => "PULL_REQUEST",
            Self::Merge => "MERGE",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for Action {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "PUSH" => Self::Push,
            "PULL_REQUEST" => Self::PullRequest,
            "MERGE" => Self::Merge,
            _ => Self::Other(raw),
        }
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        action.as_str().to_string()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized event, as produced from an inbound webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    /// Commit id for pushes, PR number for pull requests and merges.
    pub request_id: String,
    pub author: String,
    pub action: Action,
    /// Always `None` for pushes.
    pub from_branch: Option<String>,
    pub to_branch: String,
    /// Stored verbatim from the payload; only reformatted for display.
    pub timestamp: Option<String>,
}

/// An event document as read back from the store.
///
/// Every field is optional since the collection may hold records this
/// service did not write. Numbers and booleans are read as their string form;
/// any other non-string value reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventDocument {
    #[serde(deserialize_with = "lenient_string")]
    pub request_id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub author: Option<String>,
    #[serde(deserialize_with = "lenient_action")]
    pub action: Option<Action>,
    #[serde(deserialize_with = "lenient_string")]
    pub from_branch: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub to_branch: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub timestamp: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

fn lenient_action<'de, D>(deserializer: D) -> Result<Option<Action>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.map(Action::from))
}

impl From<Event> for EventDocument {
    fn from(event: Event) -> Self {
        Self {
            request_id: Some(event.request_id),
            author: Some(event.author),
            action: Some(event.action),
            from_branch: event.from_branch,
            to_branch: Some(event.to_branch),
            timestamp: event.timestamp,
        }
    }
}

/// A persisted document together with its store-generated id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredEvent {
    pub id: String,
    #[serde(flatten)]
    pub document: EventDocument,
}
