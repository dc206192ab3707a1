//! Codec errors

use thiserror::Error;

/// Failure while decoding or persisting wire records
///
/// Encoding in-memory values never fails; every variant here comes from
/// reading.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The container ran out of bytes in the middle of a field
    #[error("truncated input: needed {needed} bytes at offset {offset}, {remaining} remaining")]
    Truncated {
        /// Bytes the field required
        needed: usize,
        /// Bytes that were left
        remaining: usize,
        /// Cursor position when the read was attempted
        offset: usize,
    },

    /// A string field was not valid UTF-8
    #[error("invalid UTF-8 in string field at offset {offset}")]
    InvalidUtf8 {
        /// Cursor position of the string payload
        offset: usize,
    },

    /// Reading or writing a record file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for codec operations
pub type CodecResult<T> = Result<T, CodecError>;
