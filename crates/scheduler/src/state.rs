//! Scheduler state machine and counters

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Scheduler lifecycle
///
/// `Idle -> Armed -> (Firing <-> Armed) -> Terminated`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedulerState {
    /// Constructed, timer not started
    #[default]
    Idle,
    /// Timer running, no tick in progress
    Armed,
    /// A tick is being executed
    Firing,
    /// Stopped; no further ticks
    Terminated,
}

impl fmt::Display for SchedulerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Armed => "armed",
            Self::Firing => "firing",
            Self::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

/// Why the run loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Shutdown future resolved
    Shutdown,
    /// Configured number of timer expirations reached
    MaxTicks,
    /// Tick worker exited on its own
    WorkerStopped,
}

/// Tick counters shared between the timer task and the worker
#[derive(Debug, Default)]
pub struct SchedulerStats {
    /// Timer expirations handed to the worker
    ticks_fired: AtomicU64,
    /// Ticks that ran to completion
    ticks_completed: AtomicU64,
    /// Timer expirations dropped because a tick was still running
    ticks_missed: AtomicU64,
    /// Sum of tick durations
    busy_micros: AtomicU64,
    /// Longest tick
    max_tick_micros: AtomicU64,
}

impl SchedulerStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ticks_fired(&self) -> u64 {
        self.ticks_fired.load(Ordering::Relaxed)
    }

    pub fn inc_fired(&self) {
        self.ticks_fired.fetch_add(1, Ordering::Relaxed);
    }

    pub fn ticks_completed(&self) -> u64 {
        self.ticks_completed.load(Ordering::Relaxed)
    }

    /// Record a finished tick and how long it took
    pub fn record_completed(&self, elapsed: Duration) {
        let micros = elapsed.as_micros().min(u128::from(u64::MAX)) as u64;
        self.ticks_completed.fetch_add(1, Ordering::Relaxed);
        self.busy_micros.fetch_add(micros, Ordering::Relaxed);
        self.max_tick_micros.fetch_max(micros, Ordering::Relaxed);
    }

    pub fn ticks_missed(&self) -> u64 {
        self.ticks_missed.load(Ordering::Relaxed)
    }

    pub fn inc_missed(&self) {
        self.ticks_missed.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all counters
    pub fn snapshot(&self) -> StatsSnapshot {
        let completed = self.ticks_completed();
        let busy = self.busy_micros.load(Ordering::Relaxed);
        StatsSnapshot {
            ticks_fired: self.ticks_fired(),
            ticks_completed: completed,
            ticks_missed: self.ticks_missed(),
            mean_tick: Duration::from_micros(busy.checked_div(completed).unwrap_or(0)),
            max_tick: Duration::from_micros(self.max_tick_micros.load(Ordering::Relaxed)),
        }
    }
}

/// Snapshot of scheduler counters (for reporting)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub ticks_fired: u64,
    pub ticks_completed: u64,
    pub ticks_missed: u64,
    pub mean_tick: Duration,
    pub max_tick: Duration,
}

impl StatsSnapshot {
    /// Timer expirations observed, fired or missed
    pub fn expirations(&self) -> u64 {
        self.ticks_fired + self.ticks_missed
    }
}
