//! Property tests for the typed-integer decoder

use proptest::prelude::*;

use stx_counter::domain::clarity::{
    decode, encode_signed, encode_unsigned, narrow_i128, RawResponse, ResultValue,
};

fn decode_text(s: &str) -> Result<String, String> {
    decode(&RawResponse::with_result(ResultValue::text(s)))
        .map(|v| v.to_string())
        .map_err(|e| e.to_string())
}

// Property 1: unsigned tag round-trips the full 128-bit range
proptest! {
    #[test]
    fn test_unsigned_tag_decodes_exactly(n in any::<u128>()) {
        let encoded = encode_unsigned(n);
        prop_assert_eq!(encoded.len(), 36);
        prop_assert_eq!(decode_text(&encoded), Ok(n.to_string()));
    }
}

// Property 2: signed tag recovers two's complement across the range
proptest! {
    #[test]
    fn test_signed_tag_decodes_exactly(n in any::<i128>()) {
        let encoded = encode_signed(n);
        let decoded = decode(&RawResponse::with_result(ResultValue::text(encoded)));
        prop_assert_eq!(decoded.map(narrow_i128), Ok(Some(n)));
    }
}

// Property 3: native numbers pass straight through
proptest! {
    #[test]
    fn test_native_number_identity(n in any::<i64>()) {
        let body = format!(r#"{{"okay":true,"result":{n}}}"#);
        let response: RawResponse = serde_json::from_str(&body).unwrap();
        prop_assert_eq!(decode(&response).map(|v| v.to_string()), Ok(n.to_string()));
    }
}

// Property 4: u-prefixed and value-object forms agree with the number
proptest! {
    #[test]
    fn test_decimal_forms_agree(n in any::<u64>()) {
        prop_assert_eq!(decode_text(&format!("u{n}")), Ok(n.to_string()));

        let body = format!(r#"{{"result":{{"value":"{n}"}}}}"#);
        let response: RawResponse = serde_json::from_str(&body).unwrap();
        prop_assert_eq!(decode(&response).map(|v| v.to_string()), Ok(n.to_string()));
    }
}

// Property 5: decoding never panics and is deterministic
proptest! {
    #[test]
    fn test_arbitrary_text_is_total(s in ".{0,80}") {
        let first = decode_text(&s);
        let second = decode_text(&s);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_arbitrary_hex_body_is_total(body in "[0-9a-fA-FxzZ+-]{0,70}") {
        let input = format!("0x{body}");
        prop_assert_eq!(decode_text(&input), decode_text(&input));
    }
}

#[test]
fn test_spec_examples() {
    assert_eq!(decode_text("u42"), Ok("42".to_string()));
    assert_eq!(decode_text("7"), Ok("7".to_string()));
    assert_eq!(decode_text("abc7xyz"), Ok("7".to_string()));
    assert_eq!(
        decode_text("0x0700000000000000000000000000000001"),
        Ok("1".to_string())
    );
    assert_eq!(
        decode_text("0x07ffffffffffffffffffffffffffffffff"),
        Ok("-1".to_string())
    );
    assert!(decode_text("0xzz").is_err());

    let empty: RawResponse = serde_json::from_str(r#"{"result":{}}"#).unwrap();
    assert!(decode(&empty).is_err());
}
