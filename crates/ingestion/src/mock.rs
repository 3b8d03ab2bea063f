//! Mock channel source
//!
//! Used for testing and bench runs without ADC hardware.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use contracts::{ChannelIndex, ChannelSource, ContractError, Sample};

use crate::lenient::parse_sample;

/// Mock channel behaviour
#[derive(Debug, Clone)]
enum MockReading {
    /// Cycle through raw text readings
    Text(Vec<Vec<u8>>),
    /// Fail every read with an I/O error
    Failing,
}

/// Mock channel source
///
/// Readings go through the same lenient conversion as sysfs text.
#[derive(Debug, Clone)]
pub struct MockChannel {
    channel: ChannelIndex,
    reading: MockReading,
    delay: Duration,
    reads: Arc<AtomicU64>,
}

impl MockChannel {
    fn new(channel: u8, reading: MockReading) -> Self {
        Self {
            channel: ChannelIndex::new(channel),
            reading,
            delay: Duration::ZERO,
            reads: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Channel that always reads `value`
    pub fn fixed(channel: u8, value: Sample) -> Self {
        Self::sequence(channel, &[value])
    }

    /// Channel that cycles through `values`, one per read
    pub fn sequence(channel: u8, values: &[Sample]) -> Self {
        let texts = values
            .iter()
            .map(|v| format!("{v}\n").into_bytes())
            .collect();
        Self::new(channel, MockReading::Text(texts))
    }

    /// Channel whose pseudo-file always contains `text`
    pub fn text(channel: u8, text: &str) -> Self {
        Self::new(channel, MockReading::Text(vec![text.as_bytes().to_vec()]))
    }

    /// Channel whose reads always fail
    pub fn failing(channel: u8) -> Self {
        Self::new(channel, MockReading::Failing)
    }

    /// Block for `delay` on every read
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Shared read counter
    pub fn read_counter(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.reads)
    }
}

impl ChannelSource for MockChannel {
    fn channel(&self) -> ChannelIndex {
        self.channel
    }

    fn read(&mut self) -> Result<Sample, ContractError> {
        let n = self.reads.fetch_add(1, Ordering::Relaxed);
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }

        match &self.reading {
            MockReading::Text(texts) if texts.is_empty() => Ok(0),
            MockReading::Text(texts) => Ok(parse_sample(&texts[n as usize % texts.len()])),
            MockReading::Failing => Err(ContractError::ChannelRead {
                channel: self.channel.get(),
                source: std::io::Error::other("mock read failure"),
            }),
        }
    }
}
