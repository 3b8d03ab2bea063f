//! Scheduler error types

use contracts::ContractError;
use thiserror::Error;

/// Scheduler errors
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// Period or timer could not be set up
    #[error(transparent)]
    Contract(#[from] ContractError),

    /// Encoder and channel bank disagree on the channel set
    #[error("encoder expects {expected} channels but bank has {actual}")]
    ChannelMismatch { expected: usize, actual: usize },

    /// Channel read task panicked or was cancelled
    #[error("channel read task failed: {0}")]
    ReadTask(String),

    /// Tick worker panicked or was cancelled
    #[error("tick worker failed: {0}")]
    Worker(String),
}

impl SchedulerError {
    /// Construct a timer error
    pub fn timer(message: impl Into<String>) -> Self {
        Self::Contract(ContractError::timer(message))
    }
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
