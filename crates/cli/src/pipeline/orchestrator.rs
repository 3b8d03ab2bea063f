//! Bridge orchestrator - acquires resources in order and runs the scheduler.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use codec::FrameEncoder;
use contracts::{BridgeBlueprint, ChannelSet, SamplingPeriod};
use dispatcher::{EndpointRegistry, ResolveOptions};
use ingestion::ChannelBank;
use observability::{record_startup, RunSummary};
use scheduler::{Scheduler, SchedulerConfig, TickContext};
use tracing::{debug, info};

use super::stats::collect_summary;

/// Bridge configuration
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Validated blueprint
    pub blueprint: BridgeBlueprint,

    /// Timer expirations before stopping (0 = unlimited)
    pub max_ticks: u64,
}

/// Main bridge orchestrator
pub struct Bridge {
    config: BridgeConfig,
}

impl Bridge {
    /// Create a new bridge with the given configuration
    pub fn new(config: BridgeConfig) -> Self {
        Self { config }
    }

    /// Acquire every resource, then sample until `shutdown` resolves
    ///
    /// Endpoints are resolved before channels are opened, and both happen
    /// before the timer is armed; any failure aborts startup.
    pub async fn run<F>(self, shutdown: F) -> Result<RunSummary>
    where
        F: Future<Output = ()>,
    {
        let start_time = Instant::now();
        let blueprint = &self.config.blueprint;
        let verbose = blueprint.verbose;

        let period = SamplingPeriod::from_frequency(blueprint.frequency_hz)
            .context("Failed to compute timer period")?;
        if verbose {
            info!(
                "Timer frequency: {} Hz. Period: {}",
                blueprint.frequency_hz, period
            );
        } else {
            debug!(frequency_hz = blueprint.frequency_hz, %period, "Timer period computed");
        }

        // Endpoints
        for endpoint in &blueprint.endpoints {
            if verbose {
                info!("Target Host: {}", endpoint);
            } else {
                debug!(%endpoint, "Target host");
            }
        }
        let registry = EndpointRegistry::resolve(&blueprint.endpoints, ResolveOptions { verbose })
            .await
            .context("Failed to set up UDP endpoints")?;
        let registry = Arc::new(registry);

        // Channels
        let set = ChannelSet::new(blueprint.channel_count)?;
        let bank = ChannelBank::open_sysfs(&set, &blueprint.channels.iio_device)
            .context("Failed to open ADC channels")?;
        let channel_metrics = Arc::clone(bank.metrics());
        info!(
            channels = bank.len(),
            device = %blueprint.channels.iio_device.display(),
            "ADC channels opened"
        );

        // Scheduler
        let encoder = FrameEncoder::new(blueprint.layout, set);
        let context = TickContext::new(bank, encoder, Arc::clone(&registry))?;
        let scheduler_config = SchedulerConfig::new(period).with_max_ticks(self.config.max_ticks);
        let scheduler =
            Scheduler::new(scheduler_config, context).context("Failed to create sampling timer")?;

        record_startup(blueprint.layout, &period, set.len(), registry.len());
        info!(
            layout = ?blueprint.layout,
            channels = set.len(),
            endpoints = registry.len(),
            "Starting sampling"
        );

        let report = scheduler.run(shutdown).await?;

        Ok(collect_summary(
            start_time.elapsed(),
            &report,
            &channel_metrics.snapshot(),
            registry.as_ref(),
        ))
    }
}
