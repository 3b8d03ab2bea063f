//! Sysfs channel reader
//!
//! Each ADC input is exposed by the IIO subsystem as a pseudo-file
//! `<device>/in_voltage<N>_raw` holding the latest raw code as text.
//! The file is opened once at startup and rewound before every read.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use contracts::{ChannelIndex, ChannelSource, ContractError, Sample};
use tracing::{debug, trace};

use crate::lenient::parse_sample;

/// Bytes read per sample; fits any 16-bit code plus a newline
pub const READ_BUFFER_LEN: usize = 8;

/// Path of the raw-value pseudo-file for `channel`
pub fn channel_path(device_dir: &Path, channel: ChannelIndex) -> PathBuf {
    device_dir.join(format!("in_voltage{}_raw", channel.get()))
}

/// Channel backed by an IIO sysfs pseudo-file
#[derive(Debug)]
pub struct SysfsChannel {
    channel: ChannelIndex,
    file: File,
}

impl SysfsChannel {
    /// Open the pseudo-file for `channel` under `device_dir`
    ///
    /// # Errors
    /// [`ContractError::ChannelOpen`] when the file cannot be opened.
    pub fn open(device_dir: &Path, channel: ChannelIndex) -> Result<Self, ContractError> {
        let path = channel_path(device_dir, channel);
        let file = File::open(&path).map_err(|source| ContractError::ChannelOpen {
            channel: channel.get(),
            path: path.display().to_string(),
            source,
        })?;

        debug!(channel = %channel, path = %path.display(), "channel source opened");

        Ok(Self { channel, file })
    }
}

impl ChannelSource for SysfsChannel {
    fn channel(&self) -> ChannelIndex {
        self.channel
    }

    fn read(&mut self) -> Result<Sample, ContractError> {
        let mut buf = [0u8; READ_BUFFER_LEN];
        let channel = self.channel.get();

        self.file
            .seek(SeekFrom::Start(0))
            .map_err(|source| ContractError::ChannelRead { channel, source })?;
        let len = self
            .file
            .read(&mut buf)
            .map_err(|source| ContractError::ChannelRead { channel, source })?;

        let sample = parse_sample(&buf[..len]);
        trace!(channel = %self.channel, sample, "channel read");
        Ok(sample)
    }
}
