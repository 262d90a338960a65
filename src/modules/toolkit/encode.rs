//! Encode an integer in the chain's tagged hex form

use super::ToolResult;
use crate::domain::clarity::{encode_signed, encode_unsigned};

/// `-5` / `5` encode as signed, `u5` as unsigned
pub fn encode_value(input: &str) -> Result<ToolResult, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Usage: encode <int|u<uint>>".to_string());
    }

    let (kind, hex) = if let Some(digits) = input.strip_prefix('u') {
        let value: u128 = digits
            .parse()
            .map_err(|_| format!("Invalid unsigned 128-bit integer: {}", digits))?;
        ("uint", encode_unsigned(value))
    } else {
        let value: i128 = input
            .parse()
            .map_err(|_| format!("Invalid signed 128-bit integer: {}", input))?;
        ("int", encode_signed(value))
    };

    Ok(ToolResult::new("Encode").add("type", kind).add("hex", hex))
}
