//! Clarity read-only response models and the typed-integer decoder
//!
//! This module is pure: no I/O, no shared state. The network layer hands it
//! the JSON body of a `call-read` response and gets back either an integer
//! or a [`DecodeError`] describing why the payload could not be read.

mod decoder;
pub mod encode;
mod response;

pub use decoder::{decode, decode_result, narrow_i128, narrow_i64, DecodeError, DecodedInteger};
pub use encode::{
    encode_int_argument, encode_signed, encode_unsigned, SIGNED_INT_TAG, UNSIGNED_INT_TAG,
};
pub use response::{RawResponse, ResultValue, Scalar, ValueObject};
