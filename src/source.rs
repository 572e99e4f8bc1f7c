//! Forward-only cursor over a loaded XSVF instruction stream.
//!
//! Every read either yields bytes or fails with
//! [`Error::TruncatedStream`]; there is no rewind and no random access.

use crate::error::{Error, Result};

/// A "read next byte, fail at end" view of an instruction stream.
#[derive(Debug, Clone)]
pub struct InstructionSource<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> InstructionSource<'a> {
    /// Creates a cursor positioned at the first byte of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Returns the offset of the next byte to be read.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Reads the next byte.
    pub fn next_byte(&mut self) -> Result<u8> {
        let byte = *self
            .data
            .get(self.offset)
            .ok_or(Error::TruncatedStream {
                offset: self.data.len(),
            })?;
        self.offset += 1;
        Ok(byte)
    }

    /// Reads the next `len` bytes as a borrowed slice.
    ///
    /// On failure the cursor is left where it was.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(Error::TruncatedStream {
                offset: self.data.len(),
            });
        }
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    /// Reads a big-endian `u32`.
    pub fn read_u32_be(&mut self) -> Result<u32> {
        let bytes = self.take(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Consumes `len` bytes without looking at them.
    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.take(len).map(|_| ())
    }
}
