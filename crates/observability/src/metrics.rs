//! Bridge metrics
//!
//! Startup gauges and the end-of-run summary. Per-tick counters are emitted
//! where they happen (ingestion, dispatcher, scheduler).

use std::fmt;
use std::time::Duration;

use contracts::{FrameLayout, SamplingPeriod};
use metrics::{counter, gauge};

/// Publish the effective configuration as gauges
pub fn record_startup(
    layout: FrameLayout,
    period: &SamplingPeriod,
    channel_count: usize,
    endpoint_count: usize,
) {
    let layout = match layout {
        FrameLayout::Counted => "counted",
        FrameLayout::Fixed => "fixed",
    };
    gauge!("adc_bridge_period_seconds", "layout" => layout).set(period.as_duration().as_secs_f64());
    gauge!("adc_bridge_channels").set(channel_count as f64);
    gauge!("adc_bridge_endpoints").set(endpoint_count as f64);
    counter!("adc_bridge_starts_total").increment(1);
}

/// Delivery totals for one endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointSummary {
    pub endpoint: String,
    pub sent: u64,
    pub short: u64,
    pub failed: u64,
    pub bytes: u64,
}

/// Totals for a whole run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub duration: Duration,
    pub ticks_fired: u64,
    pub ticks_completed: u64,
    pub ticks_missed: u64,
    pub mean_tick: Duration,
    pub max_tick: Duration,
    pub channel_reads: u64,
    pub channel_read_errors: u64,
    pub endpoints: Vec<EndpointSummary>,
}

impl RunSummary {
    /// Share of timer expirations that were skipped, in percent
    pub fn miss_rate(&self) -> f64 {
        let expirations = self.ticks_fired + self.ticks_missed;
        if expirations > 0 {
            self.ticks_missed as f64 / expirations as f64 * 100.0
        } else {
            0.0
        }
    }

    /// Completed ticks per second
    pub fn tick_rate(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.ticks_completed as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Datagrams that did not reach an endpoint in full
    pub fn delivery_failures(&self) -> u64 {
        self.endpoints.iter().map(|e| e.short + e.failed).sum()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Run Summary ===")?;
        writeln!(f, "Duration: {:.2}s", self.duration.as_secs_f64())?;
        writeln!(
            f,
            "Ticks: {} completed, {} missed ({:.2}%), {:.2}/s",
            self.ticks_completed,
            self.ticks_missed,
            self.miss_rate(),
            self.tick_rate()
        )?;
        writeln!(
            f,
            "Tick duration: mean {:.3}ms, max {:.3}ms",
            self.mean_tick.as_secs_f64() * 1000.0,
            self.max_tick.as_secs_f64() * 1000.0
        )?;
        writeln!(
            f,
            "Channel reads: {} ({} errors)",
            self.channel_reads, self.channel_read_errors
        )?;

        if !self.endpoints.is_empty() {
            writeln!(f, "Endpoints:")?;
            for e in &self.endpoints {
                writeln!(
                    f,
                    "  {}: {} sent, {} short, {} failed, {} bytes",
                    e.endpoint, e.sent, e.short, e.failed, e.bytes
                )?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> RunSummary {
        RunSummary {
            duration: Duration::from_secs(2),
            ticks_fired: 18,
            ticks_completed: 18,
            ticks_missed: 2,
            mean_tick: Duration::from_micros(1500),
            max_tick: Duration::from_millis(4),
            channel_reads: 36,
            channel_read_errors: 1,
            endpoints: vec![
                EndpointSummary {
                    endpoint: "127.0.0.1:5800".to_string(),
                    sent: 18,
                    bytes: 126,
                    ..Default::default()
                },
                EndpointSummary {
                    endpoint: "127.0.0.1:5801".to_string(),
                    sent: 16,
                    failed: 2,
                    bytes: 112,
                    ..Default::default()
                },
            ],
        }
    }

    #[test]
    fn test_rates() {
        let summary = summary();
        assert!((summary.miss_rate() - 10.0).abs() < 1e-10);
        assert!((summary.tick_rate() - 9.0).abs() < 1e-10);
        assert_eq!(summary.delivery_failures(), 2);
    }

    #[test]
    fn test_empty_rates() {
        let summary = RunSummary::default();
        assert_eq!(summary.miss_rate(), 0.0);
        assert_eq!(summary.tick_rate(), 0.0);
    }

    #[test]
    fn test_summary_display() {
        let output = summary().to_string();
        assert!(output.contains("18 completed, 2 missed (10.00%)"));
        assert!(output.contains("mean 1.500ms"));
        assert!(output.contains("127.0.0.1:5801: 16 sent, 0 short, 2 failed, 112 bytes"));
    }
}
