//! Counter application state: reads, submissions and the refresh fallback

use alloy_primitives::I256;
use anyhow::{Context, Result};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::domain::clarity::decode;
use crate::infrastructure::runtime::{watch_transaction, PollPolicy, WatchOutcome};
use crate::infrastructure::stacks::{StacksApi, TxId};

/// Result of following a submitted transaction
#[derive(Debug)]
pub struct FollowReport {
    pub txid: TxId,
    pub outcome: WatchOutcome,
    /// Counter re-read after the watch ended; `None` when cancelled
    pub refreshed: Option<Result<I256>>,
}

pub struct CounterApp<A> {
    api: A,
    policy: PollPolicy,
}

impl<A: StacksApi> CounterApp<A> {
    pub fn new(api: A, policy: PollPolicy) -> Self {
        Self { api, policy }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Read and decode the counter
    pub async fn current_value(&self) -> Result<I256> {
        let raw = self.api.read_counter().await?;
        if !raw.is_okay() {
            warn!(cause = ?raw.cause, "read-only call not marked okay, decoding result anyway");
        }
        let value = decode(&raw).context("Failed to parse counter value")?;
        info!(%value, "counter value");
        Ok(value)
    }

    /// Broadcast a signed transaction and follow it until it settles
    pub async fn submit_and_follow(
        &self,
        signed_tx: &[u8],
        cancel: watch::Receiver<bool>,
    ) -> Result<FollowReport> {
        let txid = self
            .api
            .submit(signed_tx)
            .await
            .context("Failed to execute transaction")?;
        info!(%txid, "transaction submitted");
        Ok(self.follow(txid, cancel).await)
    }

    /// Watch an already-submitted transaction, then re-read the counter
    pub async fn follow(&self, txid: TxId, cancel: watch::Receiver<bool>) -> FollowReport {
        let outcome = watch_transaction(&self.api, &txid, self.policy, cancel).await;

        let refreshed = match outcome {
            WatchOutcome::Cancelled => None,
            WatchOutcome::Settled(_) | WatchOutcome::Exhausted { .. } => {
                let value = self.current_value().await;
                if let Err(err) = &value {
                    warn!(error = %format!("{err:#}"), "counter refresh failed");
                }
                Some(value)
            }
        };

        FollowReport {
            txid,
            outcome,
            refreshed,
        }
    }
}
