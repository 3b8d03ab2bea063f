//! ChannelSet - the bank of ADC inputs sampled every tick

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ContractError;

/// Upper bound on the number of sampled channels
pub const MAX_CHANNELS: usize = 10;

/// Raw conversion code of one channel
///
/// Verbatim integer content of the channel source, no calibration.
pub type Sample = u16;

/// Zero-based index into the board's ADC bank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelIndex(u8);

impl ChannelIndex {
    /// Create a channel index
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Zero-based index
    pub const fn get(self) -> u8 {
        self.0
    }

    /// 1-based tag written on the wire
    pub const fn tag(self) -> u8 {
        self.0 + 1
    }
}

impl fmt::Display for ChannelIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ADC{}", self.0)
    }
}

/// Contiguous set of channels `ADC0..ADC(n-1)`
///
/// Immutable once created; `0 < len <= MAX_CHANNELS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelSet {
    count: u8,
}

impl ChannelSet {
    /// Create a channel set of `count` channels starting at ADC0
    pub fn new(count: usize) -> Result<Self, ContractError> {
        if count == 0 || count > MAX_CHANNELS {
            return Err(ContractError::config_validation(
                "channel_count",
                format!("channel count must be in 1..={MAX_CHANNELS}, got {count}"),
            ));
        }
        Ok(Self { count: count as u8 })
    }

    /// Number of channels
    pub fn len(&self) -> usize {
        self.count as usize
    }

    /// Always false: an empty set cannot be constructed
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Channels in ascending order
    pub fn iter(&self) -> impl Iterator<Item = ChannelIndex> {
        (0..self.count).map(ChannelIndex::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_set_bounds() {
        assert!(ChannelSet::new(0).is_err());
        assert!(ChannelSet::new(MAX_CHANNELS + 1).is_err());
        assert_eq!(ChannelSet::new(MAX_CHANNELS).unwrap().len(), MAX_CHANNELS);
    }

    #[test]
    fn test_channel_set_contiguous_from_zero() {
        let set = ChannelSet::new(3).unwrap();
        let indices: Vec<u8> = set.iter().map(ChannelIndex::get).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_tag_is_one_based() {
        assert_eq!(ChannelIndex::new(0).tag(), 1);
        assert_eq!(ChannelIndex::new(7).tag(), 8);
        assert_eq!(ChannelIndex::new(4).to_string(), "ADC4");
    }
}
