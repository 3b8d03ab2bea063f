//! Frame decoder, for receivers and diagnostics

use bytes::Buf;
use contracts::{FrameLayout, Sample, FIXED_LAYOUT_CHANNELS, MAX_CHANNELS};

use crate::CodecError;

/// Decoded frame: `(tag, sample)` pairs in wire order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame {
    /// 1-based channel tags and their samples
    pub entries: Vec<(u16, Sample)>,
}

impl DecodedFrame {
    /// Samples in wire order
    pub fn samples(&self) -> Vec<Sample> {
        self.entries.iter().map(|&(_, sample)| sample).collect()
    }
}

/// Decode a payload encoded in `layout`
///
/// # Errors
/// Length mismatches and counted frames with an invalid channel count.
pub fn decode(layout: FrameLayout, payload: &[u8]) -> Result<DecodedFrame, CodecError> {
    let mut buf = payload;
    let entries = match layout {
        FrameLayout::Counted => {
            if buf.is_empty() {
                return Err(CodecError::Length {
                    expected: layout.frame_len(1),
                    actual: 0,
                });
            }
            let count = buf.get_u8();
            if count == 0 || usize::from(count) > MAX_CHANNELS {
                return Err(CodecError::ChannelCount(count));
            }
            check_len(layout.frame_len(count.into()), payload.len())?;
            (0..count)
                .map(|_| (u16::from(buf.get_u8()), buf.get_u16_le()))
                .collect()
        }
        FrameLayout::Fixed => {
            check_len(layout.frame_len(FIXED_LAYOUT_CHANNELS), payload.len())?;
            (0..FIXED_LAYOUT_CHANNELS)
                .map(|_| (buf.get_u16_le(), buf.get_u16_le()))
                .collect()
        }
    };
    Ok(DecodedFrame { entries })
}

fn check_len(expected: usize, actual: usize) -> Result<(), CodecError> {
    if expected != actual {
        return Err(CodecError::Length { expected, actual });
    }
    Ok(())
}
