//! CSVF container codec.
//!
//! The second pass of the conversion squeezes the long zero runs out of the
//! normalized stream. JTAG vectors are dominated by zero bytes, so a simple
//! chunk/run scheme recovers most of the space while staying trivial for a
//! microcontroller to expand on the fly.
//!
//! # Example
//!
//! ```rust
//! use csvf::codec::{compress, decompress};
//!
//! let normalized = [0x08, 0x00, 0x00, 0x00, 0x20, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00];
//! let csvf = compress(&normalized)?;
//! assert_eq!(decompress(&csvf)?, normalized);
//! # Ok::<(), csvf::Error>(())
//! ```

pub mod length;
pub mod zero_run;

pub use zero_run::{
    DEFAULT_DECODE_LIMIT, HEADER, SHORT_RUN_MAX, Segment, Segments, ZeroRunEncoder, compress,
    decompress, decompress_with_limit,
};
