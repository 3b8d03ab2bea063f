//! Frame - binary payload of one outbound datagram

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Channel count implied by the fixed layout
pub const FIXED_LAYOUT_CHANNELS: usize = 8;

/// Wire layout of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameLayout {
    /// `[count:u8] ([tag:u8][sample:u16le])*count`
    #[default]
    Counted,
    /// `([tag:u16le][sample:u16le])*8`
    Fixed,
}

impl FrameLayout {
    /// Encoded length for `count` channels
    ///
    /// The fixed layout ignores `count`.
    pub const fn frame_len(self, count: usize) -> usize {
        match self {
            Self::Counted => 1 + 3 * count,
            Self::Fixed => 4 * FIXED_LAYOUT_CHANNELS,
        }
    }
}

/// Encoded frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Frame sequence number (tick number that produced it)
    pub seq: u64,
    /// Encoded payload
    pub payload: Bytes,
}

impl Frame {
    /// Create a frame
    pub fn new(seq: u64, payload: Bytes) -> Self {
        Self { seq, payload }
    }

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// True when the payload is empty
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Payload bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_len() {
        assert_eq!(FrameLayout::Counted.frame_len(1), 4);
        assert_eq!(FrameLayout::Counted.frame_len(10), 31);
        assert_eq!(FrameLayout::Fixed.frame_len(3), 32);
    }

    #[test]
    fn test_layout_names() {
        let json = serde_json::to_string(&FrameLayout::Fixed).unwrap();
        assert_eq!(json, "\"fixed\"");
        let parsed: FrameLayout = serde_json::from_str("\"counted\"").unwrap();
        assert_eq!(parsed, FrameLayout::Counted);
    }
}
