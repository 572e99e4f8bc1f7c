//! Zero-run compression of normalized streams.
//!
//! The input is split into alternating literal chunks and zero runs. Only
//! runs of more than [`SHORT_RUN_MAX`] zeros, or a run reaching the end of
//! the input, end a chunk; shorter runs stay inside the literal data, where
//! they are cheaper than a run record.
//!
//! ```text
//! ┌────────┬───────────┬─────────────┬─────────┬───────────┬─────
//! │ Header │ Chunk len │ Chunk bytes │ Run len │ Chunk len │ ...
//! │ 0x00   │ (length)  │             │(length) │ (length)  │
//! └────────┴───────────┴─────────────┴─────────┴───────────┴─────
//! ```
//!
//! Every chunk is followed by its run, which is zero-length when the input
//! does not end in zeros.

use std::io::{self, Write};

use super::length::{encoded_len, read_length, write_length};
use crate::error::{Error, Result};

/// The stream header byte. Reserved for option flags; currently always zero.
pub const HEADER: u8 = 0x00;

/// Longest zero run kept inside a literal chunk.
pub const SHORT_RUN_MAX: usize = 8;

/// Default upper bound on the size of a decompressed stream.
pub const DEFAULT_DECODE_LIMIT: usize = 1 << 30;

/// A literal chunk and the zero run following it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Bytes stored verbatim.
    pub chunk: &'a [u8],
    /// Number of zero bytes following the chunk.
    pub run: usize,
}

/// Iterator splitting a buffer into [`Segment`]s.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    data: &'a [u8],
    chunk_start: usize,
    pos: usize,
}

impl<'a> Segments<'a> {
    /// Creates an iterator over the segments of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            chunk_start: 0,
            pos: 0,
        }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        let data = self.data;
        while self.pos < data.len() {
            let run_start = data[self.pos..]
                .iter()
                .position(|&b| b == 0)
                .map_or(data.len(), |i| self.pos + i);
            let run_end = data[run_start..]
                .iter()
                .position(|&b| b != 0)
                .map_or(data.len(), |i| run_start + i);
            self.pos = run_end;

            let run = run_end - run_start;
            if run > SHORT_RUN_MAX || run_end == data.len() {
                let chunk = &data[self.chunk_start..run_start];
                self.chunk_start = run_end;
                return Some(Segment { chunk, run });
            }
        }
        None
    }
}

fn field(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| {
        Error::sink(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("segment of {} bytes does not fit a length field", len),
        ))
    })
}

/// Writes compressed streams to an underlying writer.
///
/// # Example
///
/// ```rust
/// use csvf::codec::ZeroRunEncoder;
///
/// let mut encoder = ZeroRunEncoder::new(Vec::new());
/// encoder.encode(&[0x12, 0x00, 0x00])?;
/// assert_eq!(encoder.into_inner(), vec![0x00, 0x01, 0x12, 0x02]);
/// # Ok::<(), csvf::Error>(())
/// ```
pub struct ZeroRunEncoder<W> {
    inner: W,
    written: u64,
}

impl<W: Write> ZeroRunEncoder<W> {
    /// Creates an encoder writing into `inner`.
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    /// Compresses `input` as one complete stream, header included.
    pub fn encode(&mut self, input: &[u8]) -> Result<()> {
        self.inner.write_all(&[HEADER]).map_err(Error::sink)?;
        self.written += 1;

        for segment in Segments::new(input) {
            let chunk_len = field(segment.chunk.len())?;
            let run_len = field(segment.run)?;
            self.write_segment(segment.chunk, chunk_len, run_len)
                .map_err(Error::sink)?;
            self.written +=
                (encoded_len(chunk_len) + segment.chunk.len() + encoded_len(run_len)) as u64;
        }
        Ok(())
    }

    fn write_segment(&mut self, chunk: &[u8], chunk_len: u32, run_len: u32) -> io::Result<()> {
        write_length(&mut self.inner, chunk_len)?;
        self.inner.write_all(chunk)?;
        write_length(&mut self.inner, run_len)
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush().map_err(Error::sink)
    }

    /// Returns the number of bytes written so far.
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    /// Returns a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Consumes the encoder, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Compresses `input` into a new buffer.
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZeroRunEncoder::new(Vec::with_capacity(input.len() / 2 + 16));
    encoder.encode(input)?;
    Ok(encoder.into_inner())
}

/// Decompresses a complete stream.
///
/// An empty first chunk and an escaped chunk length both start with a zero
/// byte, so the format is ambiguous for inputs that begin with more than
/// eight zeros. The escaped reading is tried first; an empty first chunk is
/// assumed only when it fails. Streams starting with a nonzero byte, which
/// includes every normalized stream, always decode exactly.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    decompress_with_limit(data, DEFAULT_DECODE_LIMIT)
}

/// Decompresses a complete stream, failing if the output would exceed `limit` bytes.
pub fn decompress_with_limit(data: &[u8], limit: usize) -> Result<Vec<u8>> {
    match data.first() {
        None => return Err(Error::corrupt_stream(0, "missing header")),
        Some(&HEADER) => {}
        Some(&other) => {
            return Err(Error::corrupt_stream(
                0,
                format!("unsupported header byte {:#04x}", other),
            ));
        }
    }

    match decode_segments(data, limit, false) {
        Ok(out) => Ok(out),
        // A leading zero is either an escape or an empty first chunk.
        Err(e) if data.get(1) == Some(&0) => decode_segments(data, limit, true).map_err(|_| e),
        Err(e) => Err(e),
    }
}

fn decode_segments(data: &[u8], limit: usize, empty_first_chunk: bool) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut pos = 1;
    let mut first = true;

    while pos < data.len() {
        let chunk_len = if first && empty_first_chunk {
            pos += 1;
            0
        } else {
            read_length(data, &mut pos)? as usize
        };
        first = false;

        let chunk = data
            .get(pos..pos.saturating_add(chunk_len))
            .ok_or_else(|| {
                Error::corrupt_stream(pos, format!("chunk of {} bytes overruns input", chunk_len))
            })?;
        pos += chunk_len;

        // Only the final run may be empty, and it is then the last byte.
        let run = if pos + 1 == data.len() && data[pos] == 0 {
            pos += 1;
            0
        } else {
            read_length(data, &mut pos)? as usize
        };

        let total = out.len() + chunk.len() + run;
        if total > limit {
            return Err(Error::corrupt_stream(
                pos,
                format!("decoded size {} exceeds limit of {} bytes", total, limit),
            ));
        }
        out.extend_from_slice(chunk);
        out.resize(total, 0);
    }
    Ok(out)
}
