//! Error types for the codec crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while decoding varints.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The input ended before a terminating byte was found.
    #[error("unexpected end of input at byte {position}")]
    UnexpectedEof {
        /// Offset at which more input was expected.
        position: usize,
    },

    /// The encoding does not fit in 64 bits.
    #[error("varint starting at byte {position} overflows u64")]
    Overflow {
        /// Offset of the first byte of the offending varint.
        position: usize,
    },

    /// Bytes remained after the last complete value.
    #[error("trailing bytes after last value: {remaining} left at byte {position}")]
    TrailingBytes {
        /// Offset of the first unconsumed byte.
        position: usize,
        /// Number of unconsumed bytes.
        remaining: usize,
    },
}
