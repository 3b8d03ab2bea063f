//! Error types for CLI operations.

use contracts::ContractError;
use thiserror::Error;

/// Invocation summary appended to usage errors
pub const USAGE: &str = "usage: adc-bridge -h host1:port1[,host2:port2[,...]] \
     -f <frequencyHz> -n <channelCount> [-v] \
     | adc-bridge --layout fixed -h <host> -p <port> -f <frequencyHz> [-v]";

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Required setting absent from both flags and configuration file
    #[error("{what} was missing\n{}", USAGE)]
    MissingArgument { what: &'static str },

    /// Configuration could not be read or failed validation
    #[error("{source}\n{}", USAGE)]
    Config {
        #[from]
        source: ContractError,
    },
}

impl CliError {
    pub fn missing(what: &'static str) -> Self {
        Self::MissingArgument { what }
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
