use std::fs;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tokio::sync::watch;

use stx_counter::app::{CounterApp, FollowReport};
use stx_counter::config::{self, Config, Network};
use stx_counter::infrastructure::runtime::{cancel_channel, WatchOutcome};
use stx_counter::infrastructure::stacks::{HttpStacksApi, StacksApi, TxDetails, TxId, TxStatus};
use stx_counter::logging;
use stx_counter::modules::toolkit::{call, decode, encode, ToolResult};

#[derive(Debug, Parser)]
#[command(
    name = "stx-counter",
    version,
    about = "Read and update an on-chain counter contract on Stacks"
)]
struct Args {
    /// Stacks API base URL (default depends on --network)
    #[arg(long, global = true)]
    api: Option<String>,

    #[arg(long, value_enum, global = true)]
    network: Option<Network>,

    /// Contract identifier, <address>.<name>
    #[arg(long, global = true)]
    contract: Option<String>,

    /// Log filter, e.g. `debug` or `stx_counter=trace`
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Read the current counter value
    Get,
    /// Prepare or broadcast increment, decrement, reset or increment-by <n>
    Call {
        function: String,
        #[arg(allow_hyphen_values = true)]
        amount: Option<String>,
        /// Wallet-signed transaction as hex, or @path to a file holding it
        #[arg(long)]
        signed_tx: Option<String>,
        /// Return right after broadcasting
        #[arg(long)]
        no_watch: bool,
    },
    /// Query a transaction once
    Status { txid: String },
    /// Poll a transaction until it settles, then re-read the counter
    Watch { txid: String },
    /// Decode a read-only call payload offline
    Decode { payload: String },
    /// Encode an integer in tagged hex form (u<n> for unsigned)
    Encode {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.log_level.as_deref(), args.json_logs)?;

    let config = config_from_args(&args)?;

    match args.command {
        Cmd::Decode { payload } => {
            print!("{}", decode::decode_payload(&payload).map_err(anyhow::Error::msg)?);
        }
        Cmd::Encode { value } => {
            print!("{}", encode::encode_value(&value).map_err(anyhow::Error::msg)?);
        }
        Cmd::Get => {
            let app = connect(&config)?;
            let value = app.current_value().await?;
            print!(
                "{}",
                ToolResult::new("Counter")
                    .add("value", value.to_string())
                    .add("endpoint", app.api().endpoint_name())
            );
        }
        Cmd::Call {
            function,
            amount,
            signed_tx,
            no_watch,
        } => {
            let input = match amount {
                Some(amount) => format!("{function} {amount}"),
                None => function,
            };
            let contract_call = call::prepare_call(
                &input,
                &config.contract_address(),
                &config.contract_name(),
            )
            .map_err(anyhow::Error::msg)?;

            let Some(signed_tx) = signed_tx else {
                print!("{}", call::preview(&contract_call));
                println!("{}", serde_json::to_string_pretty(&contract_call)?);
                return Ok(());
            };

            let bytes = read_signed_tx(&signed_tx)?;
            let app = connect(&config)?;
            if no_watch {
                let txid = app.api().submit(&bytes).await?;
                print!(
                    "{}",
                    ToolResult::new("Broadcast")
                        .add("function", &contract_call.function_name)
                        .add("txid", txid.to_string())
                );
                return Ok(());
            }
            let report = app.submit_and_follow(&bytes, cancel_on_ctrl_c()).await?;
            print_follow_report(&report)?;
        }
        Cmd::Status { txid } => {
            let txid = TxId::parse(&txid)?;
            let app = connect(&config)?;
            let details = app.api().tx_details(&txid).await?;
            print!("{}", details_report(&txid, &details));
        }
        Cmd::Watch { txid } => {
            let txid = TxId::parse(&txid)?;
            let app = connect(&config)?;
            let report = app.follow(txid, cancel_on_ctrl_c()).await;
            print_follow_report(&report)?;
        }
    }

    Ok(())
}

fn config_from_args(args: &Args) -> Result<Config> {
    let mut config = config::load();
    if let Some(network) = args.network {
        config.network = network;
    }
    if let Some(api) = &args.api {
        config.api_url = Some(api.clone());
    }
    if let Some(contract) = &args.contract {
        config.set_contract_id(contract)?;
    }
    Ok(config)
}

fn connect(config: &Config) -> Result<CounterApp<HttpStacksApi>> {
    let api = HttpStacksApi::new(config.provider_config())?;
    tracing::info!(endpoint = %api.endpoint_name(), "using Stacks API");
    Ok(CounterApp::new(api, config.poll_policy()))
}

/// Hex on the command line, or `@path` to a file containing hex
fn read_signed_tx(arg: &str) -> Result<Vec<u8>> {
    let text = match arg.strip_prefix('@') {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read signed transaction from {path}"))?,
        None => arg.to_string(),
    };
    let text = text.trim();
    let payload = text.strip_prefix("0x").unwrap_or(text);
    let bytes = hex::decode(payload).context("Signed transaction is not valid hex")?;
    if bytes.is_empty() {
        bail!("Signed transaction is empty");
    }
    Ok(bytes)
}

fn cancel_on_ctrl_c() -> watch::Receiver<bool> {
    let (tx, rx) = cancel_channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = tx.send(true);
        }
    });
    rx
}

fn details_report(txid: &TxId, details: &TxDetails) -> ToolResult {
    let mut result = ToolResult::new("Transaction")
        .add("txid", txid.to_string())
        .add("status", details.status.label());
    if let Some(height) = details.block_height {
        result = result.add("block", height.to_string());
    }
    if let Some(at) = details.confirmed_at {
        result = result.add("confirmed", at.to_rfc3339());
    }
    if let Some(repr) = &details.result_repr {
        result = result.add("result", repr);
    }
    result
}

fn print_follow_report(report: &FollowReport) -> Result<()> {
    let outcome = match report.outcome {
        WatchOutcome::Settled(status) => status.label().to_string(),
        WatchOutcome::Exhausted { last } => format!(
            "still {} after polling, refreshed counter",
            last.map(|s| s.label()).unwrap_or("unknown")
        ),
        WatchOutcome::Cancelled => "cancelled".to_string(),
    };

    let mut result = ToolResult::new("Transaction")
        .add("txid", report.txid.to_string())
        .add("outcome", outcome);
    match &report.refreshed {
        Some(Ok(value)) => result = result.add("counter", value.to_string()),
        Some(Err(err)) => result = result.add("counter", format!("unavailable: {err:#}")),
        None => {}
    }
    print!("{result}");

    if report.outcome == WatchOutcome::Settled(TxStatus::Aborted) {
        bail!("Transaction {} was aborted", report.txid);
    }
    Ok(())
}
