//! chain-client command line.
//!
//! ```text
//! chain-client [--config client.toml] info
//! chain-client [--config client.toml] sign --tx transaction.json --buf <hex>
//! ```
//!
//! Signing keys come from `CHAIN_CLIENT_KEYS` (comma-separated).

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use chain_client::blockchain::{NetworkError, Transaction};
use chain_client::config::{load_config, ClientConfig};
use chain_client::observability::logging::init_tracing;
use chain_client::observability::TracingLogger;
use chain_client::{ChainClient, KeySource, SignOptions};

#[derive(Parser)]
#[command(name = "chain-client")]
#[command(about = "Sign transactions with the minimal set of keys", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sign without contacting a node
    #[arg(long)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show node info and verify the chain id
    Info,
    /// Sign a serialized transaction
    Sign {
        /// Structured transaction (JSON)
        #[arg(long)]
        tx: PathBuf,

        /// Serialized transaction bytes (hex)
        #[arg(long)]
        buf: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing("chain_client=info");

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ClientConfig::default(),
    };
    if cli.offline {
        config.http_endpoint = None;
    }

    tracing::info!(
        endpoint = config.http_endpoint.as_deref().unwrap_or("offline"),
        chain_id = %config.chain_id,
        "Configuration loaded"
    );

    let mut builder = ChainClient::builder(config).logger(Arc::new(TracingLogger));
    if let Some(keys) = KeySource::from_env() {
        builder = builder.key_source(keys);
    }
    let client = builder.build()?;

    match cli.command {
        Commands::Info => {
            let network = client
                .network()
                .ok_or_else(|| NetworkError::NotAvailable("no http_endpoint configured".into()))?;
            let info = network.get_info().await?;
            println!("{}", serde_json::to_string_pretty(&info)?);

            if let Some(check) = client.take_chain_id_check() {
                println!("chain id: {:?}", check.await?);
            }
        }
        Commands::Sign { tx, buf } => {
            let transaction: Transaction = serde_json::from_str(&std::fs::read_to_string(tx)?)?;
            let buf = alloy::primitives::hex::decode(buf.trim())?;

            let signed = client
                .sign_transaction(&buf, transaction, &SignOptions::default())
                .await?;
            println!("{}", serde_json::to_string_pretty(&signed)?);
        }
    }

    Ok(())
}
