//! Stacks node API abstraction and the reqwest implementation
//!
//! Three operations are all the client needs from the chain: read the
//! counter through a read-only call, broadcast a wallet-signed transaction,
//! and look up where a transaction stands.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::core::CounterFunction;
use crate::domain::clarity::RawResponse;
use crate::infrastructure::stacks::types::{
    BroadcastRejection, ReadOnlyRequest, StacksApiError, TxDetails, TxId, TxResponse, TxStatus,
};

/// Where the counter lives and how to reach it
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL of the node / API, e.g. `https://api.mainnet.hiro.so`
    pub api_url: String,
    pub contract_address: String,
    pub contract_name: String,
    /// Principal used as `sender` for read-only calls
    pub sender: String,
    pub timeout: Duration,
}

impl ProviderConfig {
    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    pub fn contract_id(&self) -> String {
        format!("{}.{}", self.contract_address, self.contract_name)
    }
}

/// Abstract Stacks API
#[async_trait::async_trait]
pub trait StacksApi: Send + Sync + 'static {
    /// Raw `get-counter` read-only call response
    async fn read_counter(&self) -> Result<RawResponse>;

    /// Broadcast a signed transaction, returning its id
    async fn submit(&self, signed_tx: &[u8]) -> Result<TxId>;

    /// Current state of a transaction
    async fn tx_details(&self, txid: &TxId) -> Result<TxDetails>;

    async fn tx_status(&self, txid: &TxId) -> Result<TxStatus> {
        Ok(self.tx_details(txid).await?.status)
    }

    /// Get endpoint display name
    fn endpoint_name(&self) -> String;
}

pub struct HttpStacksApi {
    http: reqwest::Client,
    config: ProviderConfig,
}

impl HttpStacksApi {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { http, config })
    }

    fn read_only_url(&self, function: CounterFunction) -> String {
        format!(
            "{}/v2/contracts/call-read/{}/{}/{}",
            self.config.base_url(),
            self.config.contract_address,
            self.config.contract_name,
            function.function_name()
        )
    }
}

#[async_trait::async_trait]
impl StacksApi for HttpStacksApi {
    async fn read_counter(&self) -> Result<RawResponse> {
        let function = CounterFunction::GetCounter;
        let url = self.read_only_url(function);
        let arguments = function.arguments();
        let body = ReadOnlyRequest {
            sender: &self.config.sender,
            arguments: &arguments,
        };

        debug!(%url, "call-read");
        let resp = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("call-read request to {url} failed"))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StacksApiError::Http {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let raw: RawResponse = resp.json().await.context("Invalid call-read response")?;
        debug!(okay = ?raw.okay, result = ?raw.result, "call-read response");
        Ok(raw)
    }

    async fn submit(&self, signed_tx: &[u8]) -> Result<TxId> {
        let url = format!("{}/v2/transactions", self.config.base_url());
        debug!(%url, bytes = signed_tx.len(), "broadcast");

        let resp = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(signed_tx.to_vec())
            .send()
            .await
            .context("Broadcast request failed")?;

        let status = resp.status();
        let body = resp.text().await.context("Failed to read broadcast response")?;
        parse_broadcast_response(status, &body)
    }

    async fn tx_details(&self, txid: &TxId) -> Result<TxDetails> {
        let url = format!("{}/extended/v1/tx/{}", self.config.base_url(), txid);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Status request for {txid} failed"))?;

        let status = resp.status();
        let body = resp.text().await.context("Failed to read transaction response")?;
        parse_tx_response(status, &body)
    }

    fn endpoint_name(&self) -> String {
        format!("{} ({})", self.config.base_url(), self.config.contract_id())
    }
}

/// Map a `/v2/transactions` reply to the broadcast transaction id
fn parse_broadcast_response(status: StatusCode, body: &str) -> Result<TxId> {
    if status.is_success() {
        // The node answers with a JSON string; some proxies drop the quotes
        let raw_id = serde_json::from_str::<String>(body).unwrap_or_else(|_| body.to_string());
        return Ok(TxId::parse(&raw_id)?);
    }

    match serde_json::from_str::<BroadcastRejection>(body) {
        Ok(rejection) => {
            warn!(error = %rejection.error, reason = ?rejection.reason, "broadcast rejected");
            Err(StacksApiError::Rejected {
                error: rejection.error,
                reason: rejection.reason,
            }
            .into())
        }
        Err(_) => Err(StacksApiError::Http {
            status: status.as_u16(),
            body: body.to_string(),
        }
        .into()),
    }
}

/// Map an `/extended/v1/tx/{txid}` reply to transaction details
fn parse_tx_response(status: StatusCode, body: &str) -> Result<TxDetails> {
    // Not indexed yet: the API has not seen it in the mempool
    if status == StatusCode::NOT_FOUND {
        return Ok(TxDetails::with_status(TxStatus::Unknown));
    }
    if !status.is_success() {
        return Err(StacksApiError::Http {
            status: status.as_u16(),
            body: body.to_string(),
        }
        .into());
    }

    let parsed: TxResponse = serde_json::from_str(body).context("Invalid transaction response")?;
    Ok(parsed.into())
}
