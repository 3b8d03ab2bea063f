//! BridgeBlueprint - Config Loader output
//!
//! Describes a complete bridge: sampling rate, channel bank, frame layout and destinations.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{EndpointDescriptor, FrameLayout};

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete bridge configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeBlueprint {
    /// Configuration version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Frame layout sent on the wire
    #[serde(default)]
    pub layout: FrameLayout,

    /// Sampling frequency (Hz), must be > 0
    pub frequency_hz: f64,

    /// Number of channels sampled, starting at ADC0
    pub channel_count: usize,

    /// Narrate socket creation and timer setup at info level
    #[serde(default)]
    pub verbose: bool,

    /// Channel source settings
    #[serde(default)]
    pub channels: ChannelSourceConfig,

    /// Datagram destinations, in fan-out order
    pub endpoints: Vec<EndpointDescriptor>,
}

/// Where channel readings come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSourceConfig {
    /// IIO device directory holding `in_voltage<N>_raw`
    #[serde(default = "default_iio_device")]
    pub iio_device: PathBuf,
}

impl Default for ChannelSourceConfig {
    fn default() -> Self {
        Self {
            iio_device: default_iio_device(),
        }
    }
}

/// Default IIO device directory of the on-board ADC
pub fn default_iio_device() -> PathBuf {
    PathBuf::from("/sys/bus/iio/devices/iio:device0")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let json = r#"{
            "frequency_hz": 10.0,
            "channel_count": 2,
            "endpoints": [{ "host": "127.0.0.1", "port": 5800 }]
        }"#;
        let bp: BridgeBlueprint = serde_json::from_str(json).unwrap();
        assert_eq!(bp.layout, FrameLayout::Counted);
        assert_eq!(bp.channels.iio_device, default_iio_device());
        assert!(!bp.verbose);
        assert_eq!(bp.endpoints[0].to_string(), "127.0.0.1:5800");
    }
}
