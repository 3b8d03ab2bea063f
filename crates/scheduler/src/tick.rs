//! TickContext - everything one tick needs, owned by the worker

use std::sync::{Arc, Mutex};

use codec::FrameEncoder;
use contracts::{DatagramTransport, Sample};
use dispatcher::{fan_out, EndpointRegistry, FanOutReport};
use ingestion::ChannelBank;
use tracing::{debug, instrument};

use crate::error::{Result, SchedulerError};

/// Per-tick resources: channel handles, transmit buffer and endpoints
///
/// Built once at startup and moved into the scheduler's worker.
#[derive(Debug)]
pub struct TickContext<T> {
    bank: Arc<Mutex<ChannelBank>>,
    encoder: FrameEncoder,
    registry: Arc<EndpointRegistry<T>>,
    samples: Vec<Sample>,
}

impl<T> TickContext<T>
where
    T: DatagramTransport + Send + Sync + 'static,
{
    /// Bundle the tick resources
    ///
    /// # Errors
    /// When the encoder was built for a different channel count than the bank.
    pub fn new(
        bank: ChannelBank,
        encoder: FrameEncoder,
        registry: Arc<EndpointRegistry<T>>,
    ) -> Result<Self> {
        if encoder.channel_count() != bank.len() {
            return Err(SchedulerError::ChannelMismatch {
                expected: encoder.channel_count(),
                actual: bank.len(),
            });
        }
        let samples = Vec::with_capacity(bank.len());
        Ok(Self {
            bank: Arc::new(Mutex::new(bank)),
            encoder,
            registry,
            samples,
        })
    }

    /// Run one tick: read all channels, encode, fan out
    #[instrument(name = "tick", level = "debug", skip(self))]
    pub async fn run(&mut self, seq: u64) -> Result<FanOutReport> {
        self.read_channels().await?;
        let frame = self.encoder.encode(seq, &self.samples);
        debug!(seq, bytes = frame.len(), "Frame encoded");
        Ok(fan_out(&frame, &self.registry).await)
    }

    /// Sysfs reads block, so they run on the blocking pool
    async fn read_channels(&mut self) -> Result<()> {
        let bank = Arc::clone(&self.bank);
        let mut samples = std::mem::take(&mut self.samples);
        let samples = tokio::task::spawn_blocking(move || {
            let mut bank = bank
                .lock()
                .map_err(|_| SchedulerError::ReadTask("channel bank poisoned".to_string()))?;
            bank.sample_all(&mut samples);
            Ok::<_, SchedulerError>(samples)
        })
        .await
        .map_err(|e| SchedulerError::ReadTask(e.to_string()))??;
        self.samples = samples;
        Ok(())
    }
}
