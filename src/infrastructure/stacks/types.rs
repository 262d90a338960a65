//! Stacks API wire types and conversions into client types

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by the Stacks API client
#[derive(Debug, Error)]
pub enum StacksApiError {
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error(
        "transaction rejected: {error}{}",
        .reason.as_deref().map(|r| format!(" ({r})")).unwrap_or_default()
    )]
    Rejected {
        error: String,
        reason: Option<String>,
    },
    #[error("invalid transaction id: {0:?}")]
    InvalidTxId(String),
}

/// Transaction identifier, normalised to `0x` + 64 lower-case hex digits
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TxId(String);

impl TxId {
    pub fn parse(input: &str) -> Result<Self, StacksApiError> {
        let trimmed = input.trim().trim_matches('"');
        let payload = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if payload.len() != 64 || !payload.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(StacksApiError::InvalidTxId(input.to_string()));
        }
        Ok(Self(format!("0x{}", payload.to_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Settlement state of a submitted transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStatus {
    Pending,
    Success,
    Aborted,
    Unknown,
}

impl TxStatus {
    /// Map the API's `tx_status` string
    pub fn from_api(status: &str) -> Self {
        match status {
            "pending" => TxStatus::Pending,
            "success" => TxStatus::Success,
            "abort_by_response" | "abort_by_post_condition" => TxStatus::Aborted,
            _ => TxStatus::Unknown,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TxStatus::Success | TxStatus::Aborted)
    }

    pub fn label(&self) -> &'static str {
        match self {
            TxStatus::Pending => "pending",
            TxStatus::Success => "success",
            TxStatus::Aborted => "aborted",
            TxStatus::Unknown => "unknown",
        }
    }
}

/// What the client knows about one transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxDetails {
    pub status: TxStatus,
    pub block_height: Option<u64>,
    pub confirmed_at: Option<DateTime<Utc>>,
    /// Clarity repr of the call result, e.g. `(ok 3)`
    pub result_repr: Option<String>,
}

impl TxDetails {
    pub fn with_status(status: TxStatus) -> Self {
        Self {
            status,
            block_height: None,
            confirmed_at: None,
            result_repr: None,
        }
    }
}

/// Request body for `call-read`
#[derive(Debug, Serialize)]
pub(crate) struct ReadOnlyRequest<'a> {
    pub sender: &'a str,
    pub arguments: &'a [String],
}

/// Body of `GET /extended/v1/tx/{txid}` (fields we use)
#[derive(Debug, Deserialize)]
pub(crate) struct TxResponse {
    tx_status: String,
    #[serde(default)]
    block_height: Option<u64>,
    #[serde(default)]
    burn_block_time: Option<i64>,
    #[serde(default)]
    tx_result: Option<TxResultRepr>,
}

#[derive(Debug, Deserialize)]
struct TxResultRepr {
    #[serde(default)]
    repr: Option<String>,
}

/// Rejection body returned by `POST /v2/transactions`
#[derive(Debug, Deserialize)]
pub(crate) struct BroadcastRejection {
    pub error: String,
    #[serde(default)]
    pub reason: Option<String>,
}

impl From<TxResponse> for TxDetails {
    fn from(resp: TxResponse) -> Self {
        let status = TxStatus::from_api(&resp.tx_status);
        Self {
            status,
            // pending transactions report height 0 / time 0
            block_height: resp.block_height.filter(|h| *h > 0),
            confirmed_at: resp
                .burn_block_time
                .filter(|t| *t > 0)
                .and_then(|t| DateTime::from_timestamp(t, 0)),
            result_repr: resp.tx_result.and_then(|r| r.repr),
        }
    }
}
