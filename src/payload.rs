//! Lookup helpers over raw webhook payloads.
//!
//! Payload shapes belong to the hosting platform, so they stay as an untyped
//! [`serde_json::Value`] tree. Every access goes through a dotted path such as
//! `pull_request.user.login` and is either required (missing is an error) or
//! optional (missing yields `None`).

use serde_json::Value;

/// Failure to extract a required field from a payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    /// The field is absent or null.
    #[error("missing key: {0}")]
    MissingField(String),

    /// The field exists but holds a value of the wrong shape.
    #[error("invalid value for key: {path} (expected {expected})")]
    InvalidField { path: String, expected: &'static str },
}

/// Borrowed view over a JSON payload.
#[derive(Debug, Clone, Copy)]
pub struct Payload<'a> {
    root: &'a Value,
}

impl<'a> Payload<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self { root }
    }

    /// Top-level keys, for logging.
    pub fn keys(&self) -> Vec<&'a str> {
        self.root
            .as_object()
            .map(|map| map.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Looks up a dotted path. Null values are treated as absent.
    pub fn get(&self, path: &str) -> Option<&'a Value> {
        path.split('.')
            .try_fold(self.root, |node, key| node.as_object()?.get(key))
            .filter(|value| !value.is_null())
    }

    /// Looks up a dotted path, failing with [`PayloadError::MissingField`].
    pub fn required(&self, path: &str) -> Result<&'a Value, PayloadError> {
        self.get(path)
            .ok_or_else(|| PayloadError::MissingField(path.to_string()))
    }

    /// Required scalar rendered as a string. Numbers and booleans are stringified.
    pub fn required_string(&self, path: &str) -> Result<String, PayloadError> {
        let value = self.required(path)?;
        scalar_to_string(value).ok_or_else(|| PayloadError::InvalidField {
            path: path.to_string(),
            expected: "string",
        })
    }

    /// Optional non-empty string.
    pub fn optional_str(&self, path: &str) -> Option<&'a str> {
        self.get(path)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Loose truthiness: null, false, zero and empty strings/containers are false.
    pub fn is_truthy(&self, path: &str) -> bool {
        match self.get(path) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(items)) => !items.is_empty(),
            Some(Value::Object(map)) => !map.is_empty(),
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_lookup() {
        let value = json!({"pull_request": {"user": {"login": "octocat"}}});
        let payload = Payload::new(&value);
        assert_eq!(
            payload.required_string("pull_request.user.login").unwrap(),
            "octocat"
        );
        assert!(payload.get("pull_request.user.id").is_none());
    }

    #[test]
    fn missing_field_carries_full_path() {
        let value = json!({"pusher": {}});
        let err = Payload::new(&value).required("pusher.name").unwrap_err();
        assert_eq!(err, PayloadError::MissingField("pusher.name".to_string()));
    }

    #[test]
    fn null_counts_as_missing() {
        let value = json!({"ref": null});
        assert!(matches!(
            Payload::new(&value).required_string("ref"),
            Err(PayloadError::MissingField(_))
        ));
    }

    #[test]
    fn numbers_are_stringified() {
        let value = json!({"number": 42});
        assert_eq!(Payload::new(&value).required_string("number").unwrap(), "42");
    }

    #[test]
    fn objects_are_not_scalars() {
        let value = json!({"ref": {"name": "main"}});
        assert_eq!(
            Payload::new(&value).required_string("ref").unwrap_err(),
            PayloadError::InvalidField {
                path: "ref".to_string(),
                expected: "string"
            }
        );
    }

    #[test]
    fn truthiness() {
        let value = json!({
            "yes": true, "no": false, "zero": 0, "empty": "", "obj": {}, "full": {"a": 1}
        });
        let payload = Payload::new(&value);
        assert!(payload.is_truthy("yes"));
        assert!(payload.is_truthy("full"));
        assert!(!payload.is_truthy("no"));
        assert!(!payload.is_truthy("zero"));
        assert!(!payload.is_truthy("empty"));
        assert!(!payload.is_truthy("obj"));
        assert!(!payload.is_truthy("absent"));
    }

    #[test]
    fn optional_str_skips_empty() {
        let value = json!({"merged_at": "", "created_at": "2024-01-15T10:30:00Z"});
        let payload = Payload::new(&value);
        assert_eq!(payload.optional_str("merged_at"), None);
        assert_eq!(
            payload.optional_str("created_at"),
            Some("2024-01-15T10:30:00Z")
        );
    }

    #[test]
    fn non_object_root_has_no_fields() {
        let value = json!([1, 2, 3]);
        let payload = Payload::new(&value);
        assert!(payload.keys().is_empty());
        assert!(payload.get("head_commit").is_none());
    }
}
