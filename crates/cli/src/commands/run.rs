//! Bridge run implementation.

use anyhow::{Context, Result};
use contracts::BridgeBlueprint;
use tracing::{error, info, warn};

use crate::cli::Cli;
use crate::pipeline::{print_summary, Bridge, BridgeConfig};

use super::assemble_blueprint;

/// Validate configuration, then run the bridge until a signal or the tick bound
pub async fn run_bridge(cli: &Cli) -> Result<()> {
    let blueprint = assemble_blueprint(cli)?;

    info!(
        layout = ?blueprint.layout,
        frequency_hz = blueprint.frequency_hz,
        channels = blueprint.channel_count,
        endpoints = blueprint.endpoints.len(),
        "Configuration loaded"
    );

    // Dry run - just validate and exit
    if cli.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        print_config_summary(&blueprint)?;
        return Ok(());
    }

    let bridge = Bridge::new(BridgeConfig {
        blueprint,
        max_ticks: cli.max_ticks,
    });

    let summary = bridge
        .run(shutdown_signal())
        .await
        .context("Bridge execution failed")?;

    info!(
        ticks = summary.ticks_completed,
        missed = summary.ticks_missed,
        delivery_failures = summary.delivery_failures(),
        duration_secs = summary.duration.as_secs_f64(),
        "Bridge stopped"
    );
    print_summary(&summary);
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
///
/// A handler that cannot be installed is logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                error!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    warn!("Received shutdown signal, stopping bridge...");
}

/// Print configuration summary for dry-run mode
fn print_config_summary(blueprint: &BridgeBlueprint) -> Result<()> {
    println!("\n=== Configuration Summary ===\n");
    println!("Layout: {:?}", blueprint.layout);
    println!("Frequency: {} Hz", blueprint.frequency_hz);
    println!(
        "Channels: {} (from {})",
        blueprint.channel_count,
        blueprint.channels.iio_device.display()
    );
    println!("\nEndpoints ({}):", blueprint.endpoints.len());
    for endpoint in &blueprint.endpoints {
        println!("  - {endpoint}");
    }

    let toml = config_loader::ConfigLoader::to_toml(blueprint)
        .context("Failed to serialize configuration")?;
    println!("\nEffective configuration:\n\n{toml}");
    Ok(())
}
