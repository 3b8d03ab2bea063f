//! Permissive text-to-integer conversion of channel readings
//!
//! Produces a 16-bit unsigned code from the leading integer of the text:
//! leading whitespace is skipped, one optional sign is accepted, digits are
//! consumed up to the first non-digit, and anything unparseable reads as `0`.
//! Out-of-range values wrap modulo 2^16.

use contracts::Sample;

/// Convert raw channel text to a sample, never failing
pub fn parse_sample(text: &[u8]) -> Sample {
    let mut bytes = text
        .iter()
        .copied()
        .skip_while(u8::is_ascii_whitespace)
        .peekable();

    let negative = match bytes.peek() {
        Some(b'-') => {
            bytes.next();
            true
        }
        Some(b'+') => {
            bytes.next();
            false
        }
        _ => false,
    };

    let magnitude = bytes
        .take_while(u8::is_ascii_digit)
        .fold(0u32, |acc, digit| {
            acc.wrapping_mul(10).wrapping_add(u32::from(digit - b'0'))
        });

    let value = if negative {
        magnitude.wrapping_neg()
    } else {
        magnitude
    };
    value as Sample
}
