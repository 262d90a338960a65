//! Wire model of the node's read-only call response

use serde::{Deserialize, Serialize};

/// Body returned by `POST /v2/contracts/call-read/...`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawResponse {
    /// Missing is treated the same as `false`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub okay: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ResultValue>,
    /// Node-side explanation when the call did not succeed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

impl RawResponse {
    pub fn with_result(result: ResultValue) -> Self {
        Self {
            okay: Some(true),
            result: Some(result),
            cause: None,
        }
    }

    pub fn is_okay(&self) -> bool {
        self.okay.unwrap_or(false)
    }
}

/// The shapes `result` is known to take across node and API versions.
///
/// Variant order matters for untagged deserialization: anything that is not
/// a number, a string or an object with a usable `value` ends up in `Other`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultValue {
    Number(serde_json::Number),
    Text(String),
    Object(ValueObject),
    Other(serde_json::Value),
}

impl ResultValue {
    pub fn text(s: impl Into<String>) -> Self {
        ResultValue::Text(s.into())
    }

    /// Short label for error messages
    pub fn shape(&self) -> &'static str {
        match self {
            ResultValue::Number(_) => "number",
            ResultValue::Text(_) => "string",
            ResultValue::Object(_) => "object",
            ResultValue::Other(serde_json::Value::Null) => "null",
            ResultValue::Other(serde_json::Value::Bool(_)) => "bool",
            ResultValue::Other(serde_json::Value::Array(_)) => "array",
            ResultValue::Other(serde_json::Value::Object(_)) => "object without `value`",
            ResultValue::Other(_) => "value",
        }
    }
}

/// Clarity value object, e.g. `{"type": "int", "value": "5"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueObject {
    pub value: Scalar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(serde_json::Number),
    Text(String),
}
