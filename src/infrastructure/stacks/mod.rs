//! Stacks infrastructure - HTTP API client for the counter contract

mod provider;
pub(crate) mod types;

pub use provider::{HttpStacksApi, ProviderConfig, StacksApi};
pub use types::{StacksApiError, TxDetails, TxId, TxStatus};
