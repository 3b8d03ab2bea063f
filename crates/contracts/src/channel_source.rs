//! ChannelSource trait - per-channel raw reading abstraction
//!
//! Decouples the tick pipeline from the concrete source: sysfs pseudo-files on
//! hardware, fixed values in tests.

use crate::{ChannelIndex, ContractError, Sample};

/// One readable ADC channel
///
/// Implementations hold whatever handle they opened at startup and reuse it
/// for every tick.
pub trait ChannelSource: Send {
    /// Channel this source reads
    fn channel(&self) -> ChannelIndex;

    /// Read the current raw code
    ///
    /// Malformed text is not an error and reads as `0`.
    ///
    /// # Errors
    /// Only I/O failures of the underlying handle.
    fn read(&mut self) -> Result<Sample, ContractError>;
}
