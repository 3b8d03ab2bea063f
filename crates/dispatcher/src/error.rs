//! Dispatcher error types

use thiserror::Error;

/// Dispatcher-specific errors
#[derive(Debug, Error)]
pub enum DispatcherError {
    /// Endpoint resolution or socket creation failed (from contract)
    #[error("endpoint error: {0}")]
    Contract(#[from] contracts::ContractError),

    /// Registry would exceed the endpoint bound
    #[error("too many endpoints: {count} > {max}")]
    TooManyEndpoints { count: usize, max: usize },

    /// Registry without endpoints
    #[error("endpoint registry needs at least one endpoint")]
    NoEndpoints,
}
