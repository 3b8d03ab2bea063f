//! # Contracts
//!
//! Frozen interface contracts shared by every crate of the bridge.
//! All business crates depend on this crate only, reverse dependencies are prohibited.
//!
//! ## Data model
//! - A [`ChannelSet`] is the contiguous bank `ADC0..ADC(n-1)`
//! - A [`Sample`] is the raw 16-bit conversion code of one channel
//! - A [`Frame`] is the binary payload of one outbound datagram
//! - An [`EndpointDescriptor`] is a `host:port` destination parsed from configuration

mod blueprint;
mod channel;
mod channel_source;
mod endpoint;
mod error;
mod frame;
mod period;
mod transport;

pub use blueprint::*;
pub use channel::*;
pub use channel_source::ChannelSource;
pub use endpoint::*;
pub use error::*;
pub use frame::*;
pub use period::SamplingPeriod;
pub use transport::{DatagramTransport, LocalDatagramTransport};
