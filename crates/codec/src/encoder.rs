//! Frame encoder

use bytes::{BufMut, Bytes, BytesMut};
use contracts::{ChannelIndex, ChannelSet, Frame, FrameLayout, Sample, FIXED_LAYOUT_CHANNELS};

/// Encode `samples` for `set` in `layout`
///
/// Pure function of its inputs. Samples missing for a channel encode as `0`,
/// samples beyond the layout's channel count are ignored.
pub fn encode(layout: FrameLayout, set: &ChannelSet, samples: &[Sample]) -> Bytes {
    let mut buf = BytesMut::with_capacity(layout.frame_len(set.len()));
    encode_into(layout, set, samples, &mut buf);
    buf.freeze()
}

fn encode_into(layout: FrameLayout, set: &ChannelSet, samples: &[Sample], buf: &mut BytesMut) {
    let sample_at = |i: usize| samples.get(i).copied().unwrap_or(0);

    match layout {
        FrameLayout::Counted => {
            buf.put_u8(set.len() as u8);
            for (i, channel) in set.iter().enumerate() {
                buf.put_u8(channel.tag());
                buf.put_u16_le(sample_at(i));
            }
        }
        FrameLayout::Fixed => {
            for i in 0..FIXED_LAYOUT_CHANNELS {
                let channel = ChannelIndex::new(i as u8);
                buf.put_u16_le(u16::from(channel.tag()));
                buf.put_u16_le(sample_at(i));
            }
        }
    }
}

/// Frame encoder bound to one layout and channel set
///
/// Keeps a transmit buffer that is reused across ticks.
#[derive(Debug)]
pub struct FrameEncoder {
    layout: FrameLayout,
    set: ChannelSet,
    buf: BytesMut,
}

impl FrameEncoder {
    /// Create an encoder
    pub fn new(layout: FrameLayout, set: ChannelSet) -> Self {
        Self {
            layout,
            set,
            buf: BytesMut::with_capacity(layout.frame_len(set.len())),
        }
    }

    /// Number of channels carried per frame
    pub fn channel_count(&self) -> usize {
        self.set.len()
    }

    /// Encoded frame length
    pub fn frame_len(&self) -> usize {
        self.layout.frame_len(self.set.len())
    }

    /// Encode one tick's samples as frame `seq`
    pub fn encode(&mut self, seq: u64, samples: &[Sample]) -> Frame {
        // reclaims the previous frame's allocation once it has been dropped
        self.buf.reserve(self.frame_len());
        encode_into(self.layout, &self.set, samples, &mut self.buf);
        Frame::new(seq, self.buf.split().freeze())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::MAX_CHANNELS;

    #[test]
    fn test_counted_two_channels() {
        let set = ChannelSet::new(2).unwrap();
        let bytes = encode(FrameLayout::Counted, &set, &[100, 4095]);
        assert_eq!(&bytes[..], &[0x02, 0x01, 0x64, 0x00, 0x02, 0xFF, 0x0F]);
    }

    #[test]
    fn test_counted_length_and_count_byte() {
        for n in 1..=MAX_CHANNELS {
            let set = ChannelSet::new(n).unwrap();
            let samples: Vec<Sample> = (0..n as u16).collect();
            let bytes = encode(FrameLayout::Counted, &set, &samples);
            assert_eq!(bytes.len(), 1 + 3 * n);
            assert_eq!(bytes[0] as usize, n);
        }
    }

    #[test]
    fn test_counted_tags_are_one_based() {
        let set = ChannelSet::new(MAX_CHANNELS).unwrap();
        let bytes = encode(FrameLayout::Counted, &set, &[0; MAX_CHANNELS]);
        for i in 0..MAX_CHANNELS {
            assert_eq!(bytes[1 + 3 * i] as usize, i + 1);
        }
    }

    #[test]
    fn test_sample_field_recovers_every_value() {
        let counted = ChannelSet::new(MAX_CHANNELS).unwrap();
        let fixed = ChannelSet::new(FIXED_LAYOUT_CHANNELS).unwrap();

        for s in 0..=u16::MAX {
            let bytes = encode(FrameLayout::Counted, &counted, &[s; MAX_CHANNELS]);
            for i in 0..MAX_CHANNELS {
                let offset = 1 + 3 * i + 1;
                assert_eq!(u16::from_le_bytes([bytes[offset], bytes[offset + 1]]), s);
            }

            let bytes = encode(FrameLayout::Fixed, &fixed, &[s; FIXED_LAYOUT_CHANNELS]);
            for i in 0..FIXED_LAYOUT_CHANNELS {
                let offset = 4 * i + 2;
                assert_eq!(u16::from_le_bytes([bytes[offset], bytes[offset + 1]]), s);
            }
        }
    }

    #[test]
    fn test_fixed_layout() {
        let set = ChannelSet::new(FIXED_LAYOUT_CHANNELS).unwrap();
        let samples: Vec<Sample> = (0..8).map(|i| 1000 + i).collect();
        let bytes = encode(FrameLayout::Fixed, &set, &samples);

        assert_eq!(bytes.len(), 32);
        for i in 0..8 {
            let tag = u16::from_le_bytes([bytes[4 * i], bytes[4 * i + 1]]);
            let value = u16::from_le_bytes([bytes[4 * i + 2], bytes[4 * i + 3]]);
            assert_eq!(tag as usize, i + 1);
            assert_eq!(value, 1000 + i as u16);
        }
    }

    #[test]
    fn test_missing_samples_encode_zero() {
        let set = ChannelSet::new(2).unwrap();
        let bytes = encode(FrameLayout::Counted, &set, &[5]);
        assert_eq!(&bytes[..], &[0x02, 0x01, 0x05, 0x00, 0x02, 0x00, 0x00]);
    }

    #[test]
    fn test_encoder_reuses_buffer_across_frames() {
        let set = ChannelSet::new(2).unwrap();
        let mut encoder = FrameEncoder::new(FrameLayout::Counted, set);

        let first = encoder.encode(1, &[1, 2]);
        let second = encoder.encode(2, &[3, 4]);

        assert_eq!(first.seq, 1);
        assert_eq!(first.as_bytes(), &[0x02, 0x01, 0x01, 0x00, 0x02, 0x02, 0x00]);
        assert_eq!(second.as_bytes(), &[0x02, 0x01, 0x03, 0x00, 0x02, 0x04, 0x00]);
        assert_eq!(encoder.frame_len(), 7);
    }
}
