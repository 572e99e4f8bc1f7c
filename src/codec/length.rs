//! Variable-width length fields.
//!
//! ```text
//! value < 0x100        [v]
//! value < 0x10000      [0x00, hi, lo]
//! otherwise            [0x00, 0x00, b3, b2, b1, b0]
//! ```
//!
//! A two-byte value is at least `0x100`, so its first byte is never zero and
//! the second byte alone tells the two escaped widths apart.

use std::io::{self, Write};

use crate::error::{Error, Result};

/// Largest value stored in the single-byte form.
pub const SHORT_MAX: u32 = 0xFF;

/// Largest value stored in the two-byte form.
pub const MEDIUM_MAX: u32 = 0xFFFF;

/// Returns the encoded size of `value` in bytes.
pub fn encoded_len(value: u32) -> usize {
    if value <= SHORT_MAX {
        1
    } else if value <= MEDIUM_MAX {
        3
    } else {
        6
    }
}

/// Writes `value` as a length field.
pub fn write_length<W: Write>(w: &mut W, value: u32) -> io::Result<()> {
    if value <= SHORT_MAX {
        w.write_all(&[value as u8])
    } else if value <= MEDIUM_MAX {
        w.write_all(&[0x00, (value >> 8) as u8, value as u8])
    } else {
        let b = value.to_be_bytes();
        w.write_all(&[0x00, 0x00, b[0], b[1], b[2], b[3]])
    }
}

/// Reads a length field starting at `*pos`, advancing `*pos` past it.
///
/// A zero first byte is always treated as an escape; callers that accept a
/// literal zero must check for it before calling.
pub fn read_length(data: &[u8], pos: &mut usize) -> Result<u32> {
    let start = *pos;
    let truncated = || Error::corrupt_stream(start, "truncated length field");

    let first = *data.get(start).ok_or_else(truncated)?;
    if first != 0 {
        *pos = start + 1;
        return Ok(first as u32);
    }

    let second = *data.get(start + 1).ok_or_else(truncated)?;
    if second != 0 {
        let lo = *data.get(start + 2).ok_or_else(truncated)?;
        *pos = start + 3;
        return Ok(u32::from_be_bytes([0, 0, second, lo]));
    }

    let b = data.get(start + 2..start + 6).ok_or_else(truncated)?;
    *pos = start + 6;
    Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}
