//! cap-mcp: Capacities MCP Gateway Main Binary
//!
//! Exposes Capacities note-taking operations as MCP tools.
//!
//! Usage:
//!   cap-mcp              - Serve on the configured transport (default: stdio)
//!   cap-mcp --help       - Show configuration help
//!   cap-mcp --version    - Show version

mod handler;
mod transport;

use std::sync::Arc;

use cap_api::CapacitiesClient;
use cap_core::{Config, ToolManager};
use cap_tools::register_capacities_tools;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--version" | "-v" => {
                println!("cap-mcp {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            _ => {}
        }
    }

    // stdout carries the protocol on the stdio channel; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    // Load .env file if present
    dotenvy::dotenv().ok();

    // Configuration is read once here and passed down explicitly
    let config = Config::from_env().map_err(|e| {
        tracing::error!("Configuration error: {}", e);
        anyhow::anyhow!("{}", e)
    })?;

    let client = Arc::new(CapacitiesClient::new(&config.api_url, &config.api_token)?);

    let mut manager = ToolManager::new();
    register_capacities_tools(&mut manager, client, config.default_space_id.clone());
    let manager = Arc::new(manager);

    tracing::info!(
        "Registered {} tools: {:?}",
        manager.len(),
        manager.tool_names()
    );

    let channel = transport::select(&config);
    tracing::info!("Starting {:?} transport", channel.kind());
    channel.run(manager).await
}

/// Print help message
fn print_help() {
    println!("cap-mcp - Capacities MCP Gateway");
    println!();
    println!("Usage:");
    println!("  cap-mcp              Serve MCP tools on the configured transport");
    println!("  cap-mcp --help       Show this help message");
    println!("  cap-mcp --version    Show version");
    println!();
    println!("Environment Variables:");
    println!("  CAPACITIES_API_TOKEN Bearer token for the Capacities API (required)");
    println!("  CAPACITIES_SPACE_ID  Default space id (optional)");
    println!("  CAPACITIES_API_URL   API origin (default: https://api.capacities.io)");
    println!("  CAPACITIES_TRANSPORT Transport: stdio or http (default: stdio)");
    println!("  PORT                 Listen port for the http transport (default: 3000)");
}
