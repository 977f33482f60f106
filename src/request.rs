//! Per-call request description handed to the executor.

use http::Method;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Display;

/// One logical call: method, path, query, and optional JSON body.
///
/// Built by a module client, consumed once by [`crate::Executor::execute`].
///
/// # Examples
///
/// ```
/// use zsxq_sdk::RequestSpec;
///
/// let spec = RequestSpec::get("v2/groups/42/topics")
///     .with_query("scope", "digests")
///     .with_query("count", 5);
///
/// assert_eq!(spec.query.get("count").map(String::as_str), Some("5"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    /// The HTTP method.
    pub method: Method,

    /// Path relative to the configured base URL.
    pub path: String,

    /// Query parameters, rendered in key order.
    pub query: BTreeMap<String, String>,

    /// JSON body, if any.
    pub body: Option<Value>,
}

impl RequestSpec {
    /// Creates a spec with no query and no body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: BTreeMap::new(),
            body: None,
        }
    }

    /// A `GET` request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// A `POST` request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Adds a scalar query parameter, replacing any previous value.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.query.insert(key.into(), value.to_string());
        self
    }

    /// Adds a query parameter only when `value` is present.
    pub fn with_optional_query(self, key: impl Into<String>, value: Option<impl Display>) -> Self {
        match value {
            Some(value) => self.with_query(key, value),
            None => self,
        }
    }

    /// Sets the JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_optional_query() {
        let spec = RequestSpec::get("v2/topics/1/comments")
            .with_optional_query("count", Some(20))
            .with_optional_query("sort", None::<&str>);

        assert_eq!(spec.query.len(), 1);
        assert_eq!(spec.query["count"], "20");
    }

    #[test]
    fn test_post_with_body() {
        let spec = RequestSpec::post("v2/things").with_body(json!({"a": 1}));
        assert_eq!(spec.method, Method::POST);
        assert_eq!(spec.body, Some(json!({"a": 1})));
    }
}
