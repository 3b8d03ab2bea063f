//! ChannelBank - the set of opened channel sources sampled every tick

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use contracts::{ChannelSet, ChannelSource, ContractError, Sample, MAX_CHANNELS};
use metrics::counter;
use tracing::{info, instrument, warn};

use crate::error::{IngestionError, Result};
use crate::sysfs::SysfsChannel;

/// Channel bank metrics
#[derive(Debug, Default)]
pub struct IngestionMetrics {
    /// Total channel reads
    pub reads: AtomicU64,

    /// Reads that failed and were substituted with 0
    pub read_errors: AtomicU64,
}

impl IngestionMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Get snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            reads: self.reads.load(Ordering::Relaxed),
            read_errors: self.read_errors.load(Ordering::Relaxed),
        }
    }
}

/// Metrics snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Total channel reads
    pub reads: u64,

    /// Failed reads
    pub read_errors: u64,
}

/// Ordered channel sources `ADC0..ADC(n-1)`
pub struct ChannelBank {
    set: ChannelSet,
    sources: Vec<Box<dyn ChannelSource>>,
    metrics: Arc<IngestionMetrics>,
}

impl std::fmt::Debug for ChannelBank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelBank")
            .field("channels", &self.sources.len())
            .finish()
    }
}

impl ChannelBank {
    /// Open the sysfs pseudo-file of every channel in `set`
    ///
    /// # Errors
    /// The first channel that cannot be opened aborts the whole bank.
    #[instrument(name = "channel_bank_open_sysfs", skip(set), fields(channels = set.len()))]
    pub fn open_sysfs(
        set: &ChannelSet,
        device_dir: &Path,
    ) -> std::result::Result<Self, ContractError> {
        let sources = set
            .iter()
            .map(|channel| {
                SysfsChannel::open(device_dir, channel)
                    .map(|source| Box::new(source) as Box<dyn ChannelSource>)
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        info!(
            channels = sources.len(),
            device = %device_dir.display(),
            "channel sources opened"
        );

        Ok(Self {
            set: *set,
            sources,
            metrics: Arc::new(IngestionMetrics::new()),
        })
    }

    /// Build a bank from already opened sources
    ///
    /// # Errors
    /// Sources must be non-empty, bounded, and ordered ADC0, ADC1, ...
    pub fn from_sources(sources: Vec<Box<dyn ChannelSource>>) -> Result<Self> {
        if sources.is_empty() {
            return Err(IngestionError::Empty);
        }
        let set = ChannelSet::new(sources.len()).map_err(|_| IngestionError::TooMany {
            count: sources.len(),
            max: MAX_CHANNELS,
        })?;
        for (position, source) in sources.iter().enumerate() {
            let found = source.channel().get();
            if usize::from(found) != position {
                return Err(IngestionError::NonContiguous { position, found });
            }
        }

        Ok(Self {
            set,
            sources,
            metrics: Arc::new(IngestionMetrics::new()),
        })
    }

    /// Number of channels
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Always false for a constructed bank
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Channel set covered by this bank
    pub fn channel_set(&self) -> ChannelSet {
        self.set
    }

    /// Shared metrics
    pub fn metrics(&self) -> &Arc<IngestionMetrics> {
        &self.metrics
    }

    /// Read every channel in order into `out`
    ///
    /// A failed read is logged and recorded as `0`; it never aborts the sweep.
    pub fn sample_all(&mut self, out: &mut Vec<Sample>) {
        out.clear();
        for source in &mut self.sources {
            self.metrics.reads.fetch_add(1, Ordering::Relaxed);
            let sample = match source.read() {
                Ok(sample) => sample,
                Err(e) => {
                    self.metrics.read_errors.fetch_add(1, Ordering::Relaxed);
                    counter!(
                        "adc_bridge_channel_read_errors_total",
                        "channel" => source.channel().to_string()
                    )
                    .increment(1);
                    warn!(channel = %source.channel(), error = %e, "channel read failed, using 0");
                    0
                }
            };
            out.push(sample);
        }
    }
}
