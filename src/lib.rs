//! # csvf
//!
//! Converts XSVF JTAG programming streams into the compact CSVF format
//! replayed by small microcontroller-based JTAG players.
//!
//! A conversion runs two passes over a fully loaded input:
//!
//! 1. **Normalization** ([`normalize`]) rewrites the XSVF instructions into
//!    the reduced set the player understands, drops instructions it does not
//!    need, fuses multi-part shifts, and byte-swaps every bit vector so the
//!    player can stream them without reversing.
//! 2. **Compression** ([`codec`]) removes long runs of zero bytes, which
//!    make up most of a typical JTAG vector.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use csvf::{Result, convert_path};
//!
//! fn main() -> Result<()> {
//!     let conversion = convert_path("design.xsvf", "design.csvf")?;
//!     println!(
//!         "{} -> {} bytes, player needs a {}-byte buffer",
//!         conversion.input_len,
//!         conversion.csvf.len(),
//!         conversion.max_buffer_size
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ### Converting in Memory
//!
//! ```rust
//! use csvf::{ConvertOptions, convert_with_options};
//!
//! // XSDRSIZE 8, XSDRB 0xA5, XCOMPLETE
//! let xsvf = [0x08, 0x00, 0x00, 0x00, 0x08, 0x0C, 0xA5, 0x00];
//! let options = ConvertOptions::new().max_compare_bytes(64);
//! let conversion = convert_with_options(&xsvf, &options)?;
//! assert_eq!(csvf::codec::decompress(&conversion.csvf)?, conversion.normalized);
//! # Ok::<(), csvf::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli` | No | The `xsvf2csvf` command-line tool |
//!
//! ## Logging
//!
//! The library reports what it elides, downgrades and fuses through the
//! [`log`](https://docs.rs/log) facade. Install any logger to see it.
//!
//! ## Error Handling
//!
//! All operations return [`Result<T>`]. Every [`Error`] aborts the whole
//! conversion; no partial output is produced.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod bits;
pub mod codec;
pub mod convert;
pub mod error;
pub mod normalize;
pub mod opcode;
pub mod options;
pub mod source;

pub use convert::{
    Conversion, convert, convert_path, convert_path_with_options, convert_with_options, load_file,
    write_output, write_outputs,
};
pub use error::{Error, Result};
pub use normalize::{NormalizeStats, Normalized, Normalizer};
pub use opcode::Opcode;
pub use options::ConvertOptions;
