//! Error types for value decoding.

use thiserror::Error;

/// Errors raised while decoding one raw cell value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// Input length does not match the decoder's fixed width.
    #[error("{type_name} decoder expects {expected} bytes, got {actual}")]
    Length {
        type_name: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Input is not valid UTF-8.
    #[error("invalid UTF-8 in text value: {source}")]
    Utf8 {
        #[source]
        source: std::str::Utf8Error,
    },
}

/// Result type for decoding operations.
pub type Result<T> = std::result::Result<T, DecodeError>;
