//! Typed decode functions for envelope payloads.
//!
//! Module clients pass one of these (or a closure built from them) to
//! [`crate::Executor::execute`]. Any shape mismatch becomes
//! `ClientError::Decoding`; nothing is silently defaulted except where a
//! model type says so with `#[serde(default)]`.

use crate::{ClientError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decodes the whole payload as `T`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
///
/// let n: u32 = zsxq_sdk::decode::value(json!(5)).unwrap();
/// assert_eq!(n, 5);
/// ```
pub fn value<T: DeserializeOwned>(data: Value) -> Result<T> {
    serde_json::from_value(data).map_err(|e| ClientError::decoding(e.to_string()))
}

/// Decodes the member `name` of an object payload as `T`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
///
/// let name: String = zsxq_sdk::decode::field(json!({"name": "Rust"}), "name").unwrap();
/// assert_eq!(name, "Rust");
///
/// let err = zsxq_sdk::decode::field::<String>(json!({}), "name").unwrap_err();
/// assert_eq!(err.kind(), zsxq_sdk::ErrorKind::Decoding);
/// ```
pub fn field<T: DeserializeOwned>(data: Value, name: &str) -> Result<T> {
    let member = take_member(data, name)?
        .ok_or_else(|| ClientError::decoding(format!("missing field `{}` in response data", name)))?;
    serde_json::from_value(member)
        .map_err(|e| ClientError::decoding(format!("field `{}`: {}", name, e)))
}

/// Decodes the array member `name` of an object payload.
///
/// An explicit `null` is an empty list; a missing member is an error.
pub fn list<T: DeserializeOwned>(data: Value, name: &str) -> Result<Vec<T>> {
    match take_member(data, name)? {
        Some(Value::Null) => Ok(Vec::new()),
        Some(member) => serde_json::from_value(member)
            .map_err(|e| ClientError::decoding(format!("field `{}`: {}", name, e))),
        None => Err(ClientError::decoding(format!(
            "missing field `{}` in response data",
            name
        ))),
    }
}

fn take_member(data: Value, name: &str) -> Result<Option<Value>> {
    match data {
        Value::Object(mut map) => Ok(map.remove(name)),
        other => Err(ClientError::decoding(format!(
            "expected an object containing `{}`, got {}",
            name,
            type_name(&other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
