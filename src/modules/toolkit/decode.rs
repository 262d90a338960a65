//! Offline decode of a read-only call payload

use alloy_primitives::I256;

use super::ToolResult;
use crate::domain::clarity::{decode, narrow_i64, DecodeError, RawResponse, ResultValue};

/// Decode a JSON payload. A bare string that is not JSON (e.g. `0x07...` or
/// `u5`) is treated as the `result` field on its own.
pub fn decode_payload(input: &str) -> Result<ToolResult, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Usage: decode <json|result>".to_string());
    }

    let response = parse_payload(input).map_err(|e| format!("Invalid JSON payload: {}", e))?;
    let result = match decode(&response) {
        Ok(value) => value_report(&response, value),
        Err(err) => error_report(&response, &err),
    };
    Ok(result)
}

fn parse_payload(input: &str) -> Result<RawResponse, serde_json::Error> {
    if input.starts_with('{') {
        return serde_json::from_str(input);
    }
    // Bare result: a JSON scalar, or raw text
    match serde_json::from_str::<ResultValue>(input) {
        Ok(result) => Ok(RawResponse::with_result(result)),
        Err(_) => Ok(RawResponse::with_result(ResultValue::text(input))),
    }
}

fn value_report(response: &RawResponse, value: I256) -> ToolResult {
    let shape = response.result.as_ref().map(ResultValue::shape).unwrap_or("none");
    ToolResult::new("Decode")
        .add("shape", shape)
        .add("value", value.to_string())
        .add(
            "i64",
            narrow_i64(value)
                .map(|v| v.to_string())
                .unwrap_or_else(|| "out of range".to_string()),
        )
}

fn error_report(response: &RawResponse, err: &DecodeError) -> ToolResult {
    let shape = response.result.as_ref().map(ResultValue::shape).unwrap_or("none");
    ToolResult::new("Decode")
        .add("shape", shape)
        .add("error", err.to_string())
}
