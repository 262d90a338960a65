//! Command modules
//!
//! Modules:
//! - toolkit: offline tools (decode, encode, call preview)

pub mod toolkit;
