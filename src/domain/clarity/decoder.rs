//! Typed-integer decoder for read-only call results
//!
//! The node encodes integers as `0x` + one tag byte + a 16-byte big-endian
//! magnitude. Older API versions and proxies also hand back `u<digits>`,
//! bare numbers, decimal strings with noise around them, or Clarity value
//! objects. Every shape goes through [`decode`], which never panics.
//!
//! Values are kept as [`I256`] end to end. That holds every signed and
//! unsigned 128-bit chain value exactly; callers that want a machine integer
//! go through [`narrow_i64`] / [`narrow_i128`], which refuse values that do
//! not fit instead of truncating.

use alloy_primitives::{I256, U256};
use thiserror::Error;

use super::encode::{SIGNED_INT_TAG, UNSIGNED_INT_TAG};
use super::response::{RawResponse, ResultValue, Scalar};

/// Hex digits in a full 16-byte magnitude
const MAGNITUDE_HEX_LEN: usize = 32;

/// Hex digits that still fit in 256 bits
const MAX_HEX_DIGITS: usize = 64;

/// Outcome of decoding one response
pub type DecodedInteger = Result<I256, DecodeError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unrecognized result shape: {0}")]
    UnrecognizedShape(String),
    #[error("malformed hex value: {0}")]
    MalformedHex(String),
    #[error("malformed decimal value: {0}")]
    MalformedDecimal(String),
    #[error("not a number: {0}")]
    NotANumber(String),
}

/// Decode the counter value carried by a read-only call response.
///
/// `okay` is not consulted: a response without it is still decoded, which is
/// what the node's older API versions require.
pub fn decode(response: &RawResponse) -> DecodedInteger {
    match &response.result {
        Some(result) => decode_result(result),
        None => Err(DecodeError::UnrecognizedShape(match &response.cause {
            Some(cause) => format!("missing `result` (cause: {cause})"),
            None => "missing `result`".to_string(),
        })),
    }
}

/// Decode a bare `result` value
pub fn decode_result(result: &ResultValue) -> DecodedInteger {
    match result {
        ResultValue::Number(n) => decode_number(n),
        ResultValue::Text(s) => decode_text(s),
        ResultValue::Object(obj) => match &obj.value {
            Scalar::Number(n) => decode_number(n),
            Scalar::Text(s) => parse_decimal(s),
        },
        ResultValue::Other(_) => {
            Err(DecodeError::UnrecognizedShape(result.shape().to_string()))
        }
    }
}

/// Narrow to `i64`, or `None` if the value does not fit
pub fn narrow_i64(value: I256) -> Option<i64> {
    i64::try_from(value).ok()
}

/// Narrow to `i128`, or `None` if the value does not fit
pub fn narrow_i128(value: I256) -> Option<i128> {
    i128::try_from(value).ok()
}

fn decode_number(n: &serde_json::Number) -> DecodedInteger {
    if let Some(v) = n.as_i64() {
        return widen(v);
    }
    if let Some(v) = n.as_u64() {
        return widen(v);
    }
    match n.as_f64() {
        // A whole f64 is an exact integer; fixed precision prints all its digits
        Some(f) if f.is_finite() && f.fract() == 0.0 => I256::from_dec_str(&format!("{f:.0}"))
            .map_err(|_| DecodeError::NotANumber(format!("{n} exceeds the signed 256-bit range"))),
        _ => Err(DecodeError::NotANumber(format!("{n} is not an integer"))),
    }
}

fn decode_text(s: &str) -> DecodedInteger {
    if let Some(body) = s.strip_prefix("0x") {
        return decode_hex(body);
    }
    if let Some(digits) = s.strip_prefix('u') {
        return parse_unsigned_decimal(digits);
    }
    parse_loose_decimal(s)
}

fn decode_hex(body: &str) -> DecodedInteger {
    if body.len() < 2 {
        return parse_plain_hex(body);
    }

    let tag = body
        .get(..2)
        .filter(|t| is_hex(t))
        .and_then(|t| u8::from_str_radix(t, 16).ok());

    match tag {
        Some(SIGNED_INT_TAG) => decode_signed_magnitude(&body[2..]),
        Some(UNSIGNED_INT_TAG) => {
            hex_to_u256(strip_leading_zeros(&body[2..])).and_then(to_signed)
        }
        _ => parse_plain_hex(body),
    }
}

/// 128-bit two's complement. Only a full-width magnitude can be negative.
fn decode_signed_magnitude(magnitude: &str) -> DecodedInteger {
    if !is_hex(magnitude) {
        return Err(DecodeError::MalformedHex(format!("{magnitude:?}")));
    }

    let high_byte = magnitude.get(..2).and_then(|b| u8::from_str_radix(b, 16).ok());
    if magnitude.len() == MAGNITUDE_HEX_LEN && high_byte.is_some_and(|b| b >= 0x80) {
        let bits = u128::from_str_radix(magnitude, 16)
            .map_err(|e| DecodeError::MalformedHex(format!("{magnitude:?}: {e}")))?;
        // raw - 2^128 is exactly the i128 reinterpretation of the bit pattern
        return widen(bits as i128);
    }

    hex_to_u256(strip_leading_zeros(magnitude)).and_then(to_signed)
}

fn parse_plain_hex(body: &str) -> DecodedInteger {
    hex_to_u256(body).and_then(to_signed)
}

fn hex_to_u256(digits: &str) -> Result<U256, DecodeError> {
    if digits.is_empty() {
        return Err(DecodeError::MalformedHex("empty hex body".to_string()));
    }
    if !is_hex(digits) {
        return Err(DecodeError::MalformedHex(format!("{digits:?}")));
    }
    if digits.trim_start_matches('0').len() > MAX_HEX_DIGITS {
        return Err(DecodeError::MalformedHex(format!(
            "{digits:?} exceeds 256 bits"
        )));
    }
    U256::from_str_radix(digits, 16)
        .map_err(|e| DecodeError::MalformedHex(format!("{digits:?}: {e}")))
}

fn parse_unsigned_decimal(digits: &str) -> DecodedInteger {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecodeError::MalformedDecimal(format!("u{digits}")));
    }
    U256::from_str_radix(digits, 10)
        .map_err(|e| DecodeError::MalformedDecimal(format!("u{digits}: {e}")))
        .and_then(to_signed)
}

/// Keep the digits, and a minus sign only if it comes before the first digit.
/// `"12abc34"` reads as 1234.
fn parse_loose_decimal(s: &str) -> DecodedInteger {
    let mut negative = false;
    let mut digits = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else if c == '-' && digits.is_empty() {
            negative = true;
        }
    }

    if digits.is_empty() {
        return Err(DecodeError::MalformedDecimal(format!("no digits in {s:?}")));
    }

    let signed = if negative { format!("-{digits}") } else { digits };
    I256::from_dec_str(&signed)
        .map_err(|e| DecodeError::MalformedDecimal(format!("{signed}: {e}")))
}

/// Strict base-10 with an optional sign, used for Clarity value objects
fn parse_decimal(s: &str) -> DecodedInteger {
    let trimmed = s.trim();
    let unsigned = trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('+'))
        .unwrap_or(trimmed);
    if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecodeError::MalformedDecimal(format!("{s:?}")));
    }
    I256::from_dec_str(trimmed)
        .map_err(|e| DecodeError::MalformedDecimal(format!("{s:?}: {e}")))
}

fn strip_leading_zeros(s: &str) -> &str {
    let stripped = s.trim_start_matches('0');
    if stripped.is_empty() {
        "0"
    } else {
        stripped
    }
}

fn is_hex(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_hexdigit())
}

fn to_signed(value: U256) -> DecodedInteger {
    I256::try_from(value)
        .map_err(|_| DecodeError::NotANumber(format!("{value} exceeds the signed 256-bit range")))
}

fn widen<T>(value: T) -> DecodedInteger
where
    T: TryInto<I256> + Copy + std::fmt::Display,
{
    value
        .try_into()
        .map_err(|_| DecodeError::NotANumber(format!("{value} does not fit")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> DecodedInteger {
        decode(&RawResponse::with_result(ResultValue::text(s)))
    }

    fn json(body: &str) -> DecodedInteger {
        decode(&serde_json::from_str::<RawResponse>(body).unwrap())
    }

    fn int(v: i64) -> I256 {
        I256::try_from(v).unwrap()
    }

    #[test]
    fn test_native_number() {
        assert_eq!(json(r#"{"okay":true,"result":42}"#), Ok(int(42)));
        assert_eq!(json(r#"{"result":-3}"#), Ok(int(-3)));
        assert_eq!(json(r#"{"result":4.0}"#), Ok(int(4)));
        assert!(matches!(
            json(r#"{"result":4.5}"#),
            Err(DecodeError::NotANumber(_))
        ));
    }

    #[test]
    fn test_u64_number_beyond_i64() {
        let value = json(r#"{"result":18446744073709551615}"#).unwrap();
        assert_eq!(value.to_string(), "18446744073709551615");
        assert_eq!(narrow_i64(value), None);
    }

    #[test]
    fn test_whole_float_beyond_u64() {
        // serde_json keeps these as f64
        let value = json(r#"{"result":18446744073709551616}"#).unwrap();
        assert_eq!(value.to_string(), "18446744073709551616");
        let value = json(r#"{"result":1e19}"#).unwrap();
        assert_eq!(value.to_string(), "10000000000000000000");
        let value = json(r#"{"result":-1e19}"#).unwrap();
        assert_eq!(value.to_string(), "-10000000000000000000");
        assert!(matches!(
            json(r#"{"result":1e300}"#),
            Err(DecodeError::NotANumber(_))
        ));
    }

    #[test]
    fn test_signed_tag() {
        assert_eq!(text("0x0700000000000000000000000000000001"), Ok(int(1)));
        assert_eq!(text("0x07ffffffffffffffffffffffffffffffff"), Ok(int(-1)));
        assert_eq!(
            text("0x0780000000000000000000000000000000").map(narrow_i128),
            Ok(Some(i128::MIN))
        );
        assert_eq!(
            text("0x077fffffffffffffffffffffffffffffff").map(narrow_i128),
            Ok(Some(i128::MAX))
        );
    }

    #[test]
    fn test_signed_tag_short_magnitude_is_positive() {
        // high bit only counts at full width
        assert_eq!(text("0x07ff"), Ok(int(255)));
        assert_eq!(text("0x07"), Ok(int(0)));
    }

    #[test]
    fn test_unsigned_tag() {
        assert_eq!(text("0x0800000000000000000000000000000005"), Ok(int(5)));
        let max = text("0x08ffffffffffffffffffffffffffffffff").unwrap();
        assert_eq!(max.to_string(), u128::MAX.to_string());
        assert_eq!(narrow_i128(max), None);
    }

    #[test]
    fn test_unknown_tag_is_plain_hex() {
        assert_eq!(text("0x0a"), Ok(int(10)));
        assert_eq!(text("0x01ff"), Ok(int(0x01ff)));
    }

    #[test]
    fn test_short_hex_body() {
        assert_eq!(text("0x5"), Ok(int(5)));
        assert!(matches!(text("0x"), Err(DecodeError::MalformedHex(_))));
        assert!(matches!(text("0xg"), Err(DecodeError::MalformedHex(_))));
    }

    #[test]
    fn test_malformed_hex() {
        assert!(matches!(text("0xzz"), Err(DecodeError::MalformedHex(_))));
        assert!(matches!(text("0x07zz"), Err(DecodeError::MalformedHex(_))));
        assert!(matches!(text("0x08+1"), Err(DecodeError::MalformedHex(_))));
        assert!(matches!(
            text(&format!("0x01{}", "f".repeat(80))),
            Err(DecodeError::MalformedHex(_))
        ));
    }

    #[test]
    fn test_u_prefixed_decimal() {
        assert_eq!(text("u42"), Ok(int(42)));
        assert_eq!(text("u0"), Ok(int(0)));
        assert!(matches!(text("u"), Err(DecodeError::MalformedDecimal(_))));
        assert!(matches!(text("u-5"), Err(DecodeError::MalformedDecimal(_))));
        assert!(matches!(text("u4x"), Err(DecodeError::MalformedDecimal(_))));
    }

    #[test]
    fn test_loose_decimal() {
        assert_eq!(text("7"), Ok(int(7)));
        assert_eq!(text("abc7xyz"), Ok(int(7)));
        assert_eq!(text("(ok -5)"), Ok(int(-5)));
        assert_eq!(text("5-3"), Ok(int(53)));
        assert!(matches!(text("abc"), Err(DecodeError::MalformedDecimal(_))));
        assert!(matches!(text(""), Err(DecodeError::MalformedDecimal(_))));
        assert!(matches!(text("-"), Err(DecodeError::MalformedDecimal(_))));
    }

    /// Free-form strings strip every non-digit rather than stopping at the
    /// first one, so "12abc34" is 1234 and not 12.
    #[test]
    fn test_decimal_policy_strips_instead_of_truncating() {
        assert_eq!(text("12abc34"), Ok(int(1234)));
    }

    #[test]
    fn test_value_object() {
        assert_eq!(json(r#"{"result":{"value":"5"}}"#), Ok(int(5)));
        assert_eq!(json(r#"{"result":{"type":"int","value":"-12"}}"#), Ok(int(-12)));
        assert_eq!(json(r#"{"result":{"value":9}}"#), Ok(int(9)));
        assert!(matches!(
            json(r#"{"result":{"value":"5x"}}"#),
            Err(DecodeError::MalformedDecimal(_))
        ));
    }

    #[test]
    fn test_unrecognized_shapes() {
        assert!(matches!(json(r#"{"result":{}}"#), Err(DecodeError::UnrecognizedShape(_))));
        assert!(matches!(json(r#"{"result":true}"#), Err(DecodeError::UnrecognizedShape(_))));
        assert!(matches!(json(r#"{"okay":true}"#), Err(DecodeError::UnrecognizedShape(_))));
    }

    #[test]
    fn test_missing_result_reports_cause() {
        let err = json(r#"{"okay":false,"cause":"Unchecked(NoSuchContract)"}"#).unwrap_err();
        assert!(err.to_string().contains("NoSuchContract"));
    }

    #[test]
    fn test_large_decimal_keeps_precision() {
        let value = text("170141183460469231731687303715884105727").unwrap();
        assert_eq!(narrow_i128(value), Some(i128::MAX));
        assert_eq!(narrow_i64(value), None);
    }

    #[test]
    fn test_decode_is_deterministic() {
        let resp =
            RawResponse::with_result(ResultValue::text("0x07fffffffffffffffffffffffffffffffe"));
        assert_eq!(decode(&resp), decode(&resp));
        assert_eq!(decode(&resp), Ok(int(-2)));
    }
}
