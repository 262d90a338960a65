//! Runtime infrastructure - transaction watcher running on Tokio

mod watcher;

pub use watcher::{cancel_channel, watch_transaction, PollPolicy, WatchOutcome};
