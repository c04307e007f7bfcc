//! cellgate daemon: serves the ledger API in front of a CKB node.

mod config;

use anyhow::Context;
use cellgate_ledger::LedgerEngine;
use cellgate_node_client::JsonRpcNodeClient;
use cellgate_rpc::RpcServer;
use cellgate_types::OperationType;
use cellgate_utils::{init_logging, LogFormat};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;

use crate::config::DaemonConfig;

#[derive(Parser)]
#[command(name = "cellgate-daemon", about = "Ledger API gateway for a CKB node")]
struct Cli {
    /// Path to a TOML configuration file. File settings are the base;
    /// flags and env vars override them.
    #[arg(long, env = "CELLGATE_CONFIG")]
    config: Option<PathBuf>,

    /// HTTP port for the API.
    #[arg(long, env = "CELLGATE_PORT")]
    port: Option<u16>,

    /// Network name: "Mainnet" or "Testnet".
    #[arg(long, env = "CELLGATE_NETWORK")]
    network: Option<String>,

    /// Base URL of the node; `/rpc` and `/indexer` are appended.
    #[arg(long, env = "CELLGATE_RICH_NODE_RPC")]
    rich_node_rpc: Option<String>,

    /// Full URL of the node RPC endpoint.
    #[arg(long, env = "CELLGATE_RPC_URL")]
    rpc_url: Option<String>,

    /// Full URL of the indexer endpoint.
    #[arg(long, env = "CELLGATE_INDEXER_URL")]
    indexer_url: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "CELLGATE_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "CELLGATE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Per-request budget in seconds, across all node calls.
    #[arg(long, env = "CELLGATE_REQUEST_TIMEOUT_SECS")]
    request_timeout_secs: Option<u64>,

    /// Label the credit side of ordinary transactions as `Receive`.
    #[arg(long, env = "CELLGATE_RECEIVE_LABEL")]
    receive_label: bool,
}

impl Cli {
    fn merge_into(self, mut config: DaemonConfig) -> DaemonConfig {
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(network) = self.network {
            config.network = network;
        }
        if let Some(base) = self.rich_node_rpc {
            config.rich_node_rpc = base;
        }
        if self.rpc_url.is_some() {
            config.rpc_url = self.rpc_url;
        }
        if self.indexer_url.is_some() {
            config.indexer_url = self.indexer_url;
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        if let Some(secs) = self.request_timeout_secs {
            config.request_timeout_secs = secs;
        }
        if self.receive_label {
            config.credit_operation = OperationType::Receive;
        }
        config
    }
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("failed to listen for SIGINT: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received SIGINT, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file_config = match &cli.config {
        Some(path) => DaemonConfig::from_toml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => DaemonConfig::default(),
    };
    let config = cli.merge_into(file_config);

    init_logging(config.log_format, &config.log_level)?;

    let node = JsonRpcNodeClient::new(
        config.node_rpc_url(),
        config.node_indexer_url(),
        config.request_timeout(),
    )?;
    let engine = LedgerEngine::new(node, config.engine_config())?;

    tracing::info!(
        network = config.network_id().as_str(),
        rpc = %config.node_rpc_url(),
        indexer = %config.node_indexer_url(),
        "starting cellgate on port {}",
        config.port,
    );

    let server = RpcServer::new(config.port, Arc::new(engine));
    server.start(shutdown_signal()).await?;

    tracing::info!("cellgate daemon exited cleanly");
    Ok(())
}
