//! Tagged hex encoding of 128-bit integers

/// Type tag for a signed 128-bit integer
pub const SIGNED_INT_TAG: u8 = 0x07;

/// Type tag for an unsigned 128-bit integer
pub const UNSIGNED_INT_TAG: u8 = 0x08;

/// Clarity wire type id of `int` in contract-call arguments. Response
/// payloads use the tags above; a node only accepts this id for arguments.
pub const CLARITY_INT_TYPE_ID: u8 = 0x00;

/// `0x07` followed by the 16-byte two's-complement big-endian pattern
pub fn encode_signed(value: i128) -> String {
    tagged(SIGNED_INT_TAG, value.to_be_bytes())
}

/// `0x08` followed by the 16-byte big-endian magnitude
pub fn encode_unsigned(value: u128) -> String {
    tagged(UNSIGNED_INT_TAG, value.to_be_bytes())
}

/// Serialized Clarity `int` for a contract-call argument
pub fn encode_int_argument(value: i128) -> String {
    tagged(CLARITY_INT_TYPE_ID, value.to_be_bytes())
}

fn tagged(tag: u8, magnitude: [u8; 16]) -> String {
    format!("0x{:02x}{}", tag, hex::encode(magnitude))
}
