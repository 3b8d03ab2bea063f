//! # Scheduler
//!
//! Fixed-period sampling scheduler.
//!
//! Responsible for:
//! - Deriving a repeating, drift-free timer from the sampling period
//! - Executing each tick (read → encode → fan-out) on one dedicated worker
//! - Dropping and counting firings that overlap a running tick
//! - Publishing `Idle → Armed → (Firing ⇄ Armed) → Terminated` transitions
//!
//! ## Usage Example
//!
//! ```ignore
//! use scheduler::{Scheduler, SchedulerConfig, TickContext};
//!
//! let context = TickContext::new(bank, encoder, Arc::new(registry))?;
//! let scheduler = Scheduler::new(SchedulerConfig::new(period), context)?;
//!
//! let report = scheduler.run(shutdown_signal()).await?;
//! println!("{} ticks, {} missed", report.stats.ticks_completed, report.stats.ticks_missed);
//! ```

mod engine;
mod error;
mod state;
mod tick;

// Re-exports
pub use engine::{RunReport, Scheduler, SchedulerConfig};
pub use error::{Result, SchedulerError};
pub use state::{SchedulerState, SchedulerStats, StatsSnapshot, StopReason};
pub use tick::TickContext;
