//! Main scheduler implementation.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use contracts::{DatagramTransport, SamplingPeriod};
use metrics::{counter, histogram};
use tokio::sync::{mpsc, watch};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{error, info, instrument, warn};

use crate::error::{Result, SchedulerError};
use crate::state::{SchedulerState, SchedulerStats, StatsSnapshot, StopReason};
use crate::tick::TickContext;

/// Scheduler configuration
#[derive(Debug, Clone, Copy)]
pub struct SchedulerConfig {
    /// Timer period
    pub period: SamplingPeriod,
    /// Stop after this many timer expirations (`None` runs until shutdown)
    pub max_ticks: Option<u64>,
}

impl SchedulerConfig {
    pub fn new(period: SamplingPeriod) -> Self {
        Self {
            period,
            max_ticks: None,
        }
    }

    /// Bound the run; `0` means unbounded
    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = (max_ticks > 0).then_some(max_ticks);
        self
    }
}

/// Outcome of a finished run
#[derive(Debug, Clone, Copy)]
pub struct RunReport {
    pub stop_reason: StopReason,
    pub stats: StatsSnapshot,
}

/// Fixed-period sampling scheduler
///
/// A timer task fires every period; each firing is handed to one worker
/// task that executes the tick. A firing that arrives while the previous
/// tick is still running is dropped and counted as missed.
#[derive(Debug)]
pub struct Scheduler<T> {
    config: SchedulerConfig,
    context: TickContext<T>,
    state_tx: watch::Sender<SchedulerState>,
    stats: Arc<SchedulerStats>,
}

impl<T> Scheduler<T>
where
    T: DatagramTransport + Send + Sync + 'static,
{
    /// Create a scheduler in the `Idle` state
    ///
    /// # Errors
    /// A zero period, or one too long for the timer clock to schedule.
    pub fn new(config: SchedulerConfig, context: TickContext<T>) -> Result<Self> {
        if config.period.is_zero() {
            return Err(SchedulerError::timer("period must be non-zero"));
        }
        first_expiry(&config.period)?;
        let (state_tx, _) = watch::channel(SchedulerState::Idle);
        Ok(Self {
            config,
            context,
            state_tx,
            stats: Arc::new(SchedulerStats::new()),
        })
    }

    /// Subscribe to state transitions
    pub fn subscribe(&self) -> watch::Receiver<SchedulerState> {
        self.state_tx.subscribe()
    }

    /// Current state
    pub fn state(&self) -> SchedulerState {
        *self.state_tx.borrow()
    }

    /// Live counters
    pub fn stats(&self) -> Arc<SchedulerStats> {
        Arc::clone(&self.stats)
    }

    /// Arm the timer and run until `shutdown` resolves or the tick bound is hit
    ///
    /// An in-flight tick is allowed to finish before the scheduler reaches
    /// `Terminated`.
    #[instrument(
        name = "scheduler_run",
        skip(self, shutdown),
        fields(period = %self.config.period, max_ticks = ?self.config.max_ticks)
    )]
    pub async fn run<F>(self, shutdown: F) -> Result<RunReport>
    where
        F: Future<Output = ()>,
    {
        let Self {
            config,
            context,
            state_tx,
            stats,
        } = self;

        let period = config.period.as_duration();
        let start = first_expiry(&config.period)?;
        let busy = Arc::new(AtomicBool::new(false));
        let (tick_tx, tick_rx) = mpsc::channel::<u64>(1);

        let worker = tokio::spawn(tick_worker(
            context,
            tick_rx,
            Arc::clone(&busy),
            state_tx.clone(),
            Arc::clone(&stats),
        ));

        // Absolute schedule: first expiry one period from now, then every period
        let mut timer = interval_at(start, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        state_tx.send_replace(SchedulerState::Armed);
        info!("Scheduler armed");

        tokio::pin!(shutdown);
        let mut expirations: u64 = 0;

        let stop_reason = loop {
            tokio::select! {
                _ = &mut shutdown => break StopReason::Shutdown,
                _ = timer.tick() => {
                    expirations += 1;
                    if busy
                        .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                        .is_ok()
                    {
                        stats.inc_fired();
                        if tick_tx.try_send(expirations).is_err() {
                            error!(tick = expirations, "Tick worker closed unexpectedly");
                            break StopReason::WorkerStopped;
                        }
                    } else {
                        stats.inc_missed();
                        counter!("adc_bridge_ticks_missed_total").increment(1);
                        warn!(tick = expirations, "Previous tick still running, firing skipped");
                    }

                    if config.max_ticks.is_some_and(|max| expirations >= max) {
                        break StopReason::MaxTicks;
                    }
                }
            }
        };

        drop(tick_tx);
        let joined = worker.await;
        state_tx.send_replace(SchedulerState::Terminated);
        joined.map_err(|e| SchedulerError::Worker(e.to_string()))?;

        let stats = stats.snapshot();
        info!(
            reason = ?stop_reason,
            fired = stats.ticks_fired,
            completed = stats.ticks_completed,
            missed = stats.ticks_missed,
            "Scheduler terminated"
        );
        Ok(RunReport { stop_reason, stats })
    }
}

/// Instant one period from now
fn first_expiry(period: &SamplingPeriod) -> Result<Instant> {
    Instant::now()
        .checked_add(period.as_duration())
        .ok_or_else(|| SchedulerError::timer(format!("period {period} exceeds the timer range")))
}

/// Single worker: ticks never run concurrently
async fn tick_worker<T>(
    mut context: TickContext<T>,
    mut rx: mpsc::Receiver<u64>,
    busy: Arc<AtomicBool>,
    state_tx: watch::Sender<SchedulerState>,
    stats: Arc<SchedulerStats>,
) where
    T: DatagramTransport + Send + Sync + 'static,
{
    while let Some(seq) = rx.recv().await {
        state_tx.send_replace(SchedulerState::Firing);
        let started = Instant::now();

        match context.run(seq).await {
            Ok(report) if report.failed() > 0 => {
                warn!(
                    seq,
                    delivered = report.delivered(),
                    failed = report.failed(),
                    "Tick completed with delivery failures"
                );
            }
            Ok(_) => {}
            Err(e) => error!(seq, error = %e, "Tick failed"),
        }

        let elapsed = started.elapsed();
        stats.record_completed(elapsed);
        counter!("adc_bridge_ticks_completed_total").increment(1);
        histogram!("adc_bridge_tick_duration_seconds").record(elapsed.as_secs_f64());

        state_tx.send_replace(SchedulerState::Armed);
        busy.store(false, Ordering::Release);
    }
}
