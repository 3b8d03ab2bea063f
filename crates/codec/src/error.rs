//! Codec error types

use thiserror::Error;

/// Frame decoding errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Payload length does not match the layout
    #[error("frame length {actual} does not match expected {expected}")]
    Length { expected: usize, actual: usize },

    /// Counted frame with a zero or oversized channel count
    #[error("invalid channel count {0}")]
    ChannelCount(u8),
}
