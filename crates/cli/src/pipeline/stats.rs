//! Run statistics.

use std::time::Duration;

use dispatcher::{DatagramTransport, EndpointRegistry};
use observability::{EndpointSummary, RunSummary};
use scheduler::RunReport;

/// Fold scheduler, channel and endpoint counters into one summary
pub fn collect_summary<T: DatagramTransport>(
    duration: Duration,
    report: &RunReport,
    channels: &ingestion::MetricsSnapshot,
    registry: &EndpointRegistry<T>,
) -> RunSummary {
    let endpoints = registry
        .endpoints()
        .iter()
        .map(|endpoint| {
            let snapshot = endpoint.metrics().snapshot();
            EndpointSummary {
                endpoint: endpoint.descriptor().to_string(),
                sent: snapshot.sent_count,
                short: snapshot.short_count,
                failed: snapshot.failure_count,
                bytes: snapshot.bytes_sent,
            }
        })
        .collect();

    RunSummary {
        duration,
        ticks_fired: report.stats.ticks_fired,
        ticks_completed: report.stats.ticks_completed,
        ticks_missed: report.stats.ticks_missed,
        mean_tick: report.stats.mean_tick,
        max_tick: report.stats.max_tick,
        channel_reads: channels.reads,
        channel_read_errors: channels.read_errors,
        endpoints,
    }
}

/// Print detailed summary
pub fn print_summary(summary: &RunSummary) {
    println!();
    print!("{summary}");
    println!();
}
