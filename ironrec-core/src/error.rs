//! Error types for IronRec wire operations.

use thiserror::Error;

/// Core error type for encoding and decoding generated records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Input ended before the requested number of bytes could be read.
    #[error("buffer too short: required {required} bytes, available {available} bytes")]
    BufferTooShort {
        /// Required number of bytes.
        required: usize,
        /// Bytes left in the input.
        available: usize,
    },

    /// A sequence length exceeds the reader's configured limit.
    #[error("sequence length {len} exceeds limit {limit}")]
    SequenceTooLong {
        /// Requested element count.
        len: usize,
        /// Maximum element count accepted by the reader.
        limit: usize,
    },

    /// A sequence is too long for the 32-bit length prefix.
    #[error("sequence length {len} does not fit in a 32-bit length prefix")]
    LengthOverflow {
        /// Actual element count.
        len: usize,
    },

    /// Bytes were left over after decoding a complete value.
    #[error("{remaining} trailing bytes after decoded value")]
    TrailingBytes {
        /// Number of unread bytes.
        remaining: usize,
    },
}

/// Result type alias for IronRec wire operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_buffer_too_short() {
        let err = Error::BufferTooShort {
            required: 8,
            available: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("buffer too short"));
        assert!(msg.contains('8'));
        assert!(msg.contains('3'));
    }

    #[test]
    fn test_error_display_sequence_too_long() {
        let err = Error::SequenceTooLong {
            len: 1000,
            limit: 10,
        };
        assert_eq!(err.to_string(), "sequence length 1000 exceeds limit 10");
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(
            Error::TrailingBytes { remaining: 2 },
            Error::TrailingBytes { remaining: 2 }
        );
        assert_ne!(
            Error::TrailingBytes { remaining: 2 },
            Error::LengthOverflow { len: 2 }
        );
    }
}
