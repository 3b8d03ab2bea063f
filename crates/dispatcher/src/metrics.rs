//! Endpoint metrics for observability

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for a single endpoint
#[derive(Debug, Default)]
pub struct EndpointMetrics {
    /// Total complete datagrams sent
    sent_count: AtomicU64,
    /// Total datagrams handed over partially
    short_count: AtomicU64,
    /// Total send failures
    failure_count: AtomicU64,
    /// Total payload bytes handed to the transport
    bytes_sent: AtomicU64,
}

impl EndpointMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total sent count
    pub fn sent_count(&self) -> u64 {
        self.sent_count.load(Ordering::Relaxed)
    }

    /// Record a complete send of `bytes`
    pub fn record_sent(&self, bytes: usize) {
        self.sent_count.fetch_add(1, Ordering::Relaxed);
        self.bytes_sent.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    /// Get short write count
    pub fn short_count(&self) -> u64 {
        self.short_count.load(Ordering::Relaxed)
    }

    /// Record a short write of `bytes`
    pub fn record_short(&self, bytes: usize) {
        self.short_count.fetch_add(1, Ordering::Relaxed);
        self.bytes_sent.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    /// Get failure count
    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    /// Increment failure count
    pub fn inc_failure_count(&self) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total bytes sent
    pub fn bytes_sent(&self) -> u64 {
        self.bytes_sent.load(Ordering::Relaxed)
    }

    /// Get snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            sent_count: self.sent_count(),
            short_count: self.short_count(),
            failure_count: self.failure_count(),
            bytes_sent: self.bytes_sent(),
        }
    }
}

/// Snapshot of endpoint metrics (for reporting)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub sent_count: u64,
    pub short_count: u64,
    pub failure_count: u64,
    pub bytes_sent: u64,
}
