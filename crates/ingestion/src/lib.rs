//! # Ingestion
//!
//! ADC channel reading module.
//!
//! Responsibilities:
//! - Open one sysfs pseudo-file per channel at startup
//! - Rewind and read every channel on demand
//! - Convert raw text to samples leniently, malformed text reading as 0
//! - Provide mock sources for runs without hardware
//!
//! ## Usage Example
//!
//! ```ignore
//! use contracts::ChannelSet;
//! use ingestion::ChannelBank;
//!
//! let set = ChannelSet::new(4)?;
//! let mut bank = ChannelBank::open_sysfs(&set, Path::new("/sys/bus/iio/devices/iio:device0"))?;
//!
//! let mut samples = Vec::with_capacity(bank.len());
//! bank.sample_all(&mut samples);
//! ```

mod bank;
mod error;
mod lenient;
mod mock;
mod sysfs;

// Re-exports
pub use bank::{ChannelBank, IngestionMetrics, MetricsSnapshot};
pub use contracts::{ChannelSource, Sample};
pub use error::{IngestionError, Result};
pub use lenient::parse_sample;
pub use mock::MockChannel;
pub use sysfs::{channel_path, SysfsChannel, READ_BUFFER_LEN};
