//! Command-line client for an on-chain counter contract on Stacks.
//!
//! Reads the counter through a read-only call, broadcasts wallet-signed
//! transactions and follows them until they settle.

pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod modules;
