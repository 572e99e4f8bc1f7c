//! Exit codes for the CLI tool.

use csvf::Error;

/// Exit code constants
pub const SUCCESS: i32 = 0;
/// Fatal error occurred
pub const FATAL_ERROR: i32 = 2;
/// Input is malformed or uses unsupported instructions
pub const BAD_INPUT: i32 = 3;
/// A vector exceeds the player's compare buffer
pub const CAPACITY_EXCEEDED: i32 = 4;
/// I/O error
pub const IO_ERROR: i32 = 5;
/// Invalid command line arguments
pub const BAD_ARGS: i32 = 255;

/// Exit code enum for structured handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    FatalError,
    BadInput,
    CapacityExceeded,
    IoError,
    BadArgs,
}

impl ExitCode {
    /// Returns the numeric exit code
    pub fn code(self) -> i32 {
        match self {
            Self::Success => SUCCESS,
            Self::FatalError => FATAL_ERROR,
            Self::BadInput => BAD_INPUT,
            Self::CapacityExceeded => CAPACITY_EXCEEDED,
            Self::IoError => IO_ERROR,
            Self::BadArgs => BAD_ARGS,
        }
    }
}

/// Converts a csvf error to an exit code
pub fn error_to_exit_code(error: &Error) -> ExitCode {
    match error {
        Error::TruncatedStream { .. } => ExitCode::BadInput,
        Error::UnsupportedInstruction { .. } => ExitCode::BadInput,
        Error::UnsupportedOperand { .. } => ExitCode::BadInput,
        Error::CorruptStream { .. } => ExitCode::BadInput,
        Error::CapacityExceeded { .. } => ExitCode::CapacityExceeded,
        Error::SourceLoad { .. } | Error::SinkWrite { .. } => ExitCode::IoError,
        // Future error variants - required by #[non_exhaustive]
        _ => ExitCode::FatalError,
    }
}
