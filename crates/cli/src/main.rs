//! # ADC Bridge CLI
//!
//! Command-line entry point.
//!
//! Provides:
//! - Configuration loading and validation
//! - Ordered resource acquisition and the sampling loop
//! - Graceful shutdown handling

mod cli;
mod commands;
mod error;
mod pipeline;

use anyhow::Result;
use clap::Parser;
use observability::ObservabilityConfig;
use tracing::info;

use cli::Cli;
use commands::run_bridge;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging and metrics based on CLI options
    init_observability(&cli)?;

    info!(version = env!("CARGO_PKG_VERSION"), "ADC Bridge starting");

    let result = run_bridge(&cli).await;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}

/// Initialize logging and the optional metrics endpoint
fn init_observability(cli: &Cli) -> Result<()> {
    observability::init_with_config(ObservabilityConfig {
        log_format: cli.log_format.into(),
        metrics_port: (cli.metrics_port != 0).then_some(cli.metrics_port),
        default_log_level: observability::default_level(cli.verbose, cli.quiet).to_string(),
        honour_env: !cli.quiet,
    })
}
