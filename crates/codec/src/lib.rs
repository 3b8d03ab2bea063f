//! # Codec
//!
//! Wire frame encoding.
//!
//! Two layouts are supported as explicit modes:
//!
//! ```text
//! counted: [count:u8] { [tag:u8] [sample:u16le] } * count      len = 1 + 3n
//! fixed:   { [tag:u16le] [sample:u16le] } * 8                  len = 32
//! ```
//!
//! Tags are 1-based channel numbers (`ADC0` is tag 1).

mod decoder;
mod encoder;
mod error;

pub use decoder::{decode, DecodedFrame};
pub use encoder::{encode, FrameEncoder};
pub use error::CodecError;
