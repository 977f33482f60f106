//! The platform's response wrapper.
//!
//! Every endpoint answers with the same outer object:
//!
//! ```json
//! {"succeeded": true, "resp_data": {"group": {"group_id": 1, "name": "Rust"}}}
//! {"succeeded": false, "code": 1059, "info": "请求过于频繁"}
//! ```
//!
//! An envelope only lives for the duration of one attempt. A failed envelope
//! is never handed to callers; the classifier turns it into a
//! [`crate::ClientError`].

use serde::Deserialize;
use serde_json::Value;

/// The decoded outer payload of a response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResponseEnvelope {
    /// Whether the server considers the call successful.
    pub succeeded: bool,

    /// Server result code. Absent on most successful responses.
    #[serde(default)]
    pub code: i64,

    /// Human-readable failure description.
    #[serde(default, alias = "error")]
    pub info: Option<String>,

    /// The payload proper.
    #[serde(default, alias = "resp_data")]
    pub data: Option<Value>,
}

impl ResponseEnvelope {
    /// Parses an envelope from a raw body.
    pub fn from_body(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }

    /// The failure description, or a generic one naming the code.
    pub fn message(&self) -> String {
        match &self.info {
            Some(info) if !info.trim().is_empty() => info.clone(),
            _ => format!("request failed with code {}", self.code),
        }
    }

    /// Takes the payload, using `null` when it is absent.
    pub fn into_data(self) -> Value {
        self.data.unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resp_data_alias() {
        let envelope =
            ResponseEnvelope::from_body(r#"{"succeeded":true,"resp_data":{"user":{"user_id":7}}}"#)
                .unwrap();
        assert!(envelope.succeeded);
        assert_eq!(envelope.code, 0);
        assert_eq!(envelope.into_data(), json!({"user": {"user_id": 7}}));
    }

    #[test]
    fn test_failure_envelope() {
        let envelope =
            ResponseEnvelope::from_body(r#"{"succeeded":false,"code":1004,"info":"not found"}"#)
                .unwrap();
        assert!(!envelope.succeeded);
        assert_eq!(envelope.code, 1004);
        assert_eq!(envelope.message(), "not found");
    }

    #[test]
    fn test_failure_without_info() {
        let envelope = ResponseEnvelope::from_body(r#"{"succeeded":false,"code":42}"#).unwrap();
        assert_eq!(envelope.message(), "request failed with code 42");
        assert_eq!(envelope.into_data(), Value::Null);
    }

    #[test]
    fn test_missing_succeeded_is_an_error() {
        assert!(ResponseEnvelope::from_body(r#"{"data":{}}"#).is_err());
    }
}
