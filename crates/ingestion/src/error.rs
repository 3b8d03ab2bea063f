//! Ingestion error types

use thiserror::Error;

/// Ingestion errors
#[derive(Debug, Error)]
pub enum IngestionError {
    /// No channel sources supplied
    #[error("channel bank needs at least one source")]
    Empty,

    /// Sources are not the contiguous bank ADC0..ADC(n-1)
    #[error("channel sources must be contiguous from ADC0: position {position} holds ADC{found}")]
    NonContiguous {
        /// Position in the bank
        position: usize,
        /// Channel index found at that position
        found: u8,
    },

    /// More sources than the channel bank allows
    #[error("too many channel sources: {count} > {max}")]
    TooMany {
        /// Supplied source count
        count: usize,
        /// Upper bound
        max: usize,
    },
}

/// Ingestion Result type alias
pub type Result<T> = std::result::Result<T, IngestionError>;
