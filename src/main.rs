//! uebridge - MCP server for Unreal Editor level editing.
//!
//! Speaks the Model Context Protocol over stdio and forwards tool calls
//! as JSON commands to the Python listener running inside the editor.
//! All logging goes to stderr; stdout carries the protocol stream.

use std::path::PathBuf;

use clap::Parser;
use rmcp::{transport::stdio, ServiceExt};
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use uebridge::bridge::{Bridge, BridgeError};
use uebridge::config::{BridgeConfig, ConfigError};
use uebridge::mcp::BridgeMcpServer;

/// uebridge - Unreal Editor MCP bridge
///
/// Connects MCP clients to a running Unreal Editor. The editor-side
/// listener must be started separately (it serves HTTP on port 8765 by
/// default).
#[derive(Parser, Debug)]
#[command(name = "uebridge", version, about, long_about = None)]
struct Cli {
    /// Host of the editor listener
    #[arg(long, env = "UEBRIDGE_HOST")]
    host: Option<String>,

    /// Port of the editor listener
    #[arg(long, env = "UEBRIDGE_PORT")]
    port: Option<u16>,

    /// Path to a TOML config file (default: ~/.config/uebridge/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum MainError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error("MCP serve failed: {0}")]
    Serve(String),
}

#[tokio::main]
async fn main() -> Result<(), MainError> {
    let cli = Cli::parse();

    init_tracing_stderr();

    let config = load_config(cli.config)?;
    let host = cli.host.unwrap_or(config.host);
    let port = cli.port.unwrap_or(config.port);

    tracing::info!(host, port, "uebridge starting");

    let bridge = Bridge::new(&host, port)?;

    // Probe once at startup so a misconfigured endpoint is visible in the
    // logs immediately. The server still starts if the editor is down.
    match bridge.probe().await {
        Ok(status) => tracing::info!(?status, "editor listener is up"),
        Err(e) => tracing::warn!(error = %e, "editor listener not reachable yet"),
    }

    let server = BridgeMcpServer::new(bridge);
    let service = server
        .serve(stdio())
        .await
        .map_err(|e| MainError::Serve(e.to_string()))?;
    service
        .waiting()
        .await
        .map_err(|e| MainError::Serve(e.to_string()))?;

    Ok(())
}

/// Load the config file: the explicit `--config` path must exist, the
/// default location is optional.
fn load_config(explicit: Option<PathBuf>) -> Result<BridgeConfig, ConfigError> {
    match explicit {
        Some(path) => match BridgeConfig::load(&path)? {
            Some(config) => Ok(config),
            None => Err(ConfigError::ReadFailed(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
            )),
        },
        None => {
            let from_default = BridgeConfig::default_path()
                .map(|path| BridgeConfig::load(&path))
                .transpose()?
                .flatten();
            Ok(from_default.unwrap_or_default())
        }
    }
}

/// Tracing to stderr only. MCP uses stdout for JSON-RPC, so any stdout
/// logging would corrupt the protocol stream.
fn init_tracing_stderr() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "uebridge=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
