//! ios-simulator-mcp: MCP server for iOS simulator control over stdio
//!
//! stdout carries the protocol, so all logging goes to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ios_simulator_core::config::ServerConfig;
use ios_simulator_mcp_server::mcp::SimulatorMcpServer;
use rmcp::{ServiceExt, transport::stdio};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "ios-simulator-mcp")]
#[command(about = "MCP server for booting and screenshotting iOS simulators")]
#[command(version)]
struct Cli {
    /// Directory for captured screenshots (overrides SCREENSHOT_RESOURCE_DIR)
    #[arg(long)]
    screenshot_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Respects RUST_LOG; defaults to info for this server and the core crate
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("ios_simulator_mcp=info,ios_simulator_mcp_server=info,ios_simulator_core=info")
        }))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let config = ServerConfig::from_env_with_override(cli.screenshot_dir);
    config
        .ensure_screenshot_dir()
        .with_context(|| format!("creating {}", config.screenshot_dir.display()))?;

    info!("ios-simulator-mcp server starting...");
    info!("Transport: stdio");
    info!(
        screenshot_dir = %config.screenshot_dir.display(),
        simctl = %config.simctl_program,
        "configuration loaded"
    );

    let server = SimulatorMcpServer::from_config(config);
    let service = server.serve(stdio()).await?;

    info!("ios-simulator-mcp server initialized, waiting for MCP requests...");
    service.waiting().await?;

    info!("ios-simulator-mcp server shutting down");
    Ok(())
}
