//! Layered error definitions
//!
//! Categorized by source: config / channel / network / timer

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Channel Errors =====
    /// Channel source could not be opened at startup
    #[error("Could not open port ADC{channel} ({path}): {source}")]
    ChannelOpen {
        channel: u8,
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Channel source read failure during a tick
    #[error("read error on ADC{channel}: {source}")]
    ChannelRead {
        channel: u8,
        #[source]
        source: std::io::Error,
    },

    // ===== Network Errors =====
    /// Address resolution failed or produced no usable candidate
    #[error("could not get address info for host {host}:{port}: {message}")]
    Resolve {
        host: String,
        port: u16,
        message: String,
    },

    /// Outbound socket creation failed
    #[error("socket creation failed for {host}: {message}")]
    SocketCreate { host: String, message: String },

    // ===== Timer Errors =====
    /// Period computation or timer construction failed
    #[error("timer error: {message}")]
    Timer { message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create resolution error
    pub fn resolve(host: impl Into<String>, port: u16, message: impl Into<String>) -> Self {
        Self::Resolve {
            host: host.into(),
            port,
            message: message.into(),
        }
    }

    /// Create socket creation error
    pub fn socket_create(host: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SocketCreate {
            host: host.into(),
            message: message.into(),
        }
    }

    /// Create timer error
    pub fn timer(message: impl Into<String>) -> Self {
        Self::Timer {
            message: message.into(),
        }
    }

    /// True for errors the operator fixes by changing configuration
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::ConfigParse { .. } | Self::ConfigValidation { .. }
        )
    }
}
