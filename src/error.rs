//! Error types for XSVF to CSVF conversion.
//!
//! This module provides the [`Error`] enum which represents every way a
//! conversion can fail, along with a convenient [`Result<T>`] type alias.
//!
//! All errors are fatal to the conversion they occur in: the transform is
//! deterministic over a fixed input, so there is nothing to retry and no
//! partial result is ever returned.
//!
//! # Error Handling
//!
//! ```rust,no_run
//! use csvf::{Error, convert_path};
//!
//! fn run(input: &str, output: &str) -> csvf::Result<()> {
//!     match convert_path(input, output) {
//!         Ok(conversion) => {
//!             println!("player buffer: {} bytes", conversion.max_buffer_size);
//!             Ok(())
//!         }
//!         Err(Error::UnsupportedInstruction { opcode, offset }) => {
//!             eprintln!("opcode {:#04x} at {:#x} is not supported", opcode, offset);
//!             Err(Error::UnsupportedInstruction { opcode, offset })
//!         }
//!         Err(e) => Err(e),
//!     }
//! }
//! ```

use std::io;
use std::path::PathBuf;

use crate::opcode::Opcode;

/// Helper struct for formatting `UnsupportedInstruction` messages.
struct OpcodeDisplay(u8);

impl std::fmt::Display for OpcodeDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match Opcode::try_from(self.0) {
            Ok(op) => write!(f, "{} ({:#04x})", op, self.0),
            Err(_) => write!(f, "unknown opcode {:#04x}", self.0),
        }
    }
}

/// Helper struct for formatting the optional path of a sink failure.
struct SinkDisplay<'a>(Option<&'a std::path::Path>);

impl std::fmt::Display for SinkDisplay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(path) => write!(f, "failed to write '{}'", path.display()),
            None => write!(f, "failed to write output"),
        }
    }
}

/// The main error type for conversion operations.
///
/// | Category | Variants | Typical Cause |
/// |----------|----------|---------------|
/// | Input | [`TruncatedStream`][Self::TruncatedStream] | XSVF file cut short or missing XCOMPLETE |
/// | Compatibility | [`UnsupportedInstruction`][Self::UnsupportedInstruction], [`UnsupportedOperand`][Self::UnsupportedOperand] | Instruction the player cannot replay |
/// | Resources | [`CapacityExceeded`][Self::CapacityExceeded] | Vector larger than the player buffer |
/// | I/O | [`SourceLoad`][Self::SourceLoad], [`SinkWrite`][Self::SinkWrite] | File system operations |
/// | Integrity | [`CorruptStream`][Self::CorruptStream] | Malformed CSVF given to the decoder |
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The instruction stream ended before an XCOMPLETE opcode was read.
    ///
    /// `offset` is the position of the read that ran off the end, which is
    /// always the length of the input.
    #[error("XSVF stream truncated at offset {offset:#x} before XCOMPLETE")]
    TruncatedStream {
        /// The byte offset of the failed read.
        offset: usize,
    },

    /// An opcode outside the supported subset was encountered.
    ///
    /// Also raised for XSDRC/XSDRE outside an open XSDRB group, where the
    /// opcode is valid XSVF but cannot be placed in the output.
    #[error("Unsupported instruction {} at offset {offset:#x}", OpcodeDisplay(*.opcode))]
    UnsupportedInstruction {
        /// The raw opcode byte.
        opcode: u8,
        /// The byte offset of the opcode.
        offset: usize,
    },

    /// A supported instruction carried an operand outside the supported subset.
    ///
    /// Currently raised for XENDIR/XENDDR requesting a non-default end state.
    #[error("Unsupported operand {value:#x} for {opcode} at offset {offset:#x}")]
    UnsupportedOperand {
        /// The instruction carrying the operand.
        opcode: Opcode,
        /// The rejected operand value.
        value: u32,
        /// The byte offset of the operand.
        offset: usize,
    },

    /// An XSDRTDO vector is larger than the player's compare buffer.
    #[error(
        "XSDRTDO vector of {required} bytes at offset {offset:#x} exceeds the {limit}-byte limit"
    )]
    CapacityExceeded {
        /// Byte length of the expected-result vector.
        required: usize,
        /// The configured capacity limit.
        limit: usize,
        /// The byte offset of the instruction.
        offset: usize,
    },

    /// The input could not be loaded.
    #[error("failed to load '{}': {source}", path.display())]
    SourceLoad {
        /// The input path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The output sink failed to accept or persist the result.
    #[error("{}: {source}", SinkDisplay(path.as_deref()))]
    SinkWrite {
        /// The output path, when writing to a file.
        path: Option<PathBuf>,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A CSVF stream handed to the decoder is malformed.
    #[error("Corrupt CSVF stream at offset {offset:#x}: {reason}")]
    CorruptStream {
        /// The byte offset where corruption was detected.
        offset: usize,
        /// A description of the problem.
        reason: String,
    },
}

impl Error {
    /// Returns `true` if the input uses a feature the player does not support.
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedInstruction { .. }
                | Error::UnsupportedOperand { .. }
                | Error::CapacityExceeded { .. }
        )
    }

    /// Returns `true` if this error was propagated from the file system.
    pub fn is_io(&self) -> bool {
        matches!(self, Error::SourceLoad { .. } | Error::SinkWrite { .. })
    }

    /// Returns `true` if the input stream itself is malformed.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Error::TruncatedStream { .. } | Error::CorruptStream { .. }
        )
    }

    /// Returns the byte offset associated with this error, if any.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::TruncatedStream { offset }
            | Error::UnsupportedInstruction { offset, .. }
            | Error::UnsupportedOperand { offset, .. }
            | Error::CapacityExceeded { offset, .. }
            | Error::CorruptStream { offset, .. } => Some(*offset),
            _ => None,
        }
    }

    /// Creates a `SinkWrite` error for an in-memory or unnamed sink.
    pub fn sink(source: io::Error) -> Self {
        Error::SinkWrite { path: None, source }
    }

    /// Creates a `CorruptStream` error.
    pub fn corrupt_stream(offset: usize, reason: impl Into<String>) -> Self {
        Error::CorruptStream {
            offset,
            reason: reason.into(),
        }
    }
}

/// A specialized Result type for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_stream() {
        let err = Error::TruncatedStream { offset: 0x10 };
        assert!(err.to_string().contains("0x10"));
        assert!(err.is_corruption());
        assert_eq!(err.offset(), Some(0x10));
    }

    #[test]
    fn test_unsupported_known_opcode() {
        let err = Error::UnsupportedInstruction {
            opcode: 0x16,
            offset: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("XCOMMENT"), "{}", msg);
        assert!(msg.contains("0x16"), "{}", msg);
        assert!(err.is_unsupported());
    }

    #[test]
    fn test_unsupported_unknown_opcode() {
        let err = Error::UnsupportedInstruction {
            opcode: 0xA5,
            offset: 0,
        };
        assert!(err.to_string().contains("unknown opcode 0xa5"));
    }

    #[test]
    fn test_unsupported_operand() {
        let err = Error::UnsupportedOperand {
            opcode: Opcode::EndIr,
            value: 1,
            offset: 7,
        };
        assert!(err.to_string().contains("XENDIR"));
        assert!(err.is_unsupported());
        assert_eq!(err.offset(), Some(7));
    }

    #[test]
    fn test_capacity_exceeded() {
        let err = Error::CapacityExceeded {
            required: 129,
            limit: 128,
            offset: 0,
        };
        let msg = err.to_string();
        assert!(msg.contains("129"));
        assert!(msg.contains("128-byte"));
    }

    #[test]
    fn test_source_load() {
        let err = Error::SourceLoad {
            path: PathBuf::from("missing.xsvf"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.is_io());
        assert!(err.to_string().contains("missing.xsvf"));
        assert_eq!(err.offset(), None);
    }

    #[test]
    fn test_sink_write_without_path() {
        let err = Error::sink(io::Error::other("disk full"));
        assert!(err.is_io());
        assert!(err.to_string().starts_with("failed to write output"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
