//! Infrastructure layer - External service integrations
//!
//! This layer contains:
//! - reqwest-based Stacks API client
//! - Tokio transaction watcher

pub mod runtime;
pub mod stacks;

pub use runtime::{PollPolicy, WatchOutcome};
pub use stacks::{HttpStacksApi, ProviderConfig, StacksApi, TxId, TxStatus};
