//! ios-simulator-cli: Command-line tool for simulator gateway debugging
//!
//! Runs the same gateway operations the MCP server exposes, without the
//! protocol overhead.

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ios_simulator_core::{
    config::ServerConfig, gateway::SimulatorGateway, model::CaptureRequest,
    registry::ScreenshotRegistry,
};

#[derive(Parser)]
#[command(name = "ios-simulator-cli")]
#[command(about = "CLI tool for iOS simulator gateway debugging and testing")]
struct Cli {
    /// Directory for captured screenshots (overrides SCREENSHOT_RESOURCE_DIR)
    #[arg(long, global = true)]
    screenshot_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the first booted simulator
    Booted {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the raw device listing
    List,
    /// Boot a simulator
    Boot {
        /// Simulator UDID
        device_id: String,
    },
    /// Capture a simulator screenshot
    Screenshot {
        /// Simulator UDID
        device_id: String,
        /// Screenshot name (default: screenshot-<unix millis>)
        #[arg(long)]
        name:      Option<String>,
        /// Output file path (default: <screenshot dir>/<name>.png)
        #[arg(short, long)]
        out:       Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ios_simulator_cli=info".parse()?)
                .add_directive("ios_simulator_core=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = ServerConfig::from_env_with_override(cli.screenshot_dir);
    let gateway = SimulatorGateway::system(config, Arc::new(ScreenshotRegistry::new()));

    match cli.command {
        Commands::Booted { json } => booted(&gateway, json).await?,
        Commands::List => {
            print!("{}", gateway.list_simulators().await?);
        }
        Commands::Boot { device_id } => {
            let output = gateway.boot_simulator(&device_id).await?;
            println!("Booted {device_id}");
            if !output.is_empty() {
                println!("{output}");
            }
        }
        Commands::Screenshot {
            device_id,
            name,
            out,
        } => screenshot(&gateway, device_id, name, out).await?,
    }

    Ok(())
}

async fn booted(gateway: &SimulatorGateway, json: bool) -> Result<()> {
    let simulator = gateway.booted_simulator().await?;
    match (simulator, json) {
        (Some(sim), true) => println!("{}", serde_json::to_string_pretty(&sim)?),
        (Some(sim), false) => println!("{sim}"),
        (None, true) => println!("null"),
        (None, false) => println!("No booted simulator found"),
    }
    Ok(())
}

async fn screenshot(
    gateway: &SimulatorGateway,
    device_id: String,
    name: Option<String>,
    out: Option<PathBuf>,
) -> Result<()> {
    let mut request = CaptureRequest::new(device_id);
    request.name = name;
    request.output_path = out;

    let captured = gateway
        .capture_screenshot(request)
        .await
        .with_context(|| "capture failed")?;

    println!("Captured '{}' ({} bytes)", captured.name, captured.screenshot.len());
    println!("  File:     {}", captured.path.display());
    println!("  Resource: {}", captured.resource_uri);
    Ok(())
}
