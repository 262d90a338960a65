//! Fixed-delay transaction watcher
//!
//! Polls a transaction's status until it settles, the attempt budget runs
//! out, or the caller cancels. Exhausting the budget is not an error: the
//! caller falls back to re-reading the counter.

use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::infrastructure::stacks::{StacksApi, TxId, TxStatus};

/// How often and how long to poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: 24,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchOutcome {
    /// Reached `Success` or `Aborted`
    Settled(TxStatus),
    /// Attempts used up; `last` is the last status seen, if any request succeeded
    Exhausted { last: Option<TxStatus> },
    Cancelled,
}

/// Sender side flips to `true` to stop a running watch
pub fn cancel_channel() -> (watch::Sender<bool>, watch::Receiver<bool>) {
    watch::channel(false)
}

pub async fn watch_transaction<A>(
    api: &A,
    txid: &TxId,
    policy: PollPolicy,
    mut cancel: watch::Receiver<bool>,
) -> WatchOutcome
where
    A: StacksApi + ?Sized,
{
    let mut last = None;

    for attempt in 1..=policy.max_attempts {
        if *cancel.borrow() {
            return WatchOutcome::Cancelled;
        }

        let polled = tokio::select! {
            res = api.tx_status(txid) => res,
            _ = cancelled(&mut cancel) => return WatchOutcome::Cancelled,
        };

        match polled {
            Ok(status) if status.is_terminal() => {
                info!(%txid, attempt, status = status.label(), "transaction settled");
                return WatchOutcome::Settled(status);
            }
            Ok(status) => {
                debug!(%txid, attempt, status = status.label(), "transaction not settled");
                last = Some(status);
            }
            Err(err) => {
                warn!(%txid, attempt, error = %format!("{err:#}"), "status check failed");
            }
        }

        if attempt == policy.max_attempts {
            break;
        }

        tokio::select! {
            _ = tokio::time::sleep(policy.interval) => {}
            _ = cancelled(&mut cancel) => return WatchOutcome::Cancelled,
        }
    }

    warn!(%txid, attempts = policy.max_attempts, "gave up waiting for transaction");
    WatchOutcome::Exhausted { last }
}

/// Resolves once cancellation is requested; never resolves if the sender is gone.
async fn cancelled(rx: &mut watch::Receiver<bool>) {
    if rx.wait_for(|c| *c).await.is_err() {
        std::future::pending::<()>().await;
    }
}
