//! Wire protocol error types
//!
//! Every decode failure is terminal for the message: the session that
//! produced it should be treated as corrupted. This layer only surfaces
//! the error; tearing the session down is the host's decision.

use std::fmt;

/// Protocol error type
#[derive(Debug, Clone)]
pub struct ProtocolError {
    /// Error kind
    pub kind: ProtocolErrorKind,
    /// Error message
    pub message: String,
}

/// Protocol error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolErrorKind {
    /// Delta tag byte outside the known range
    UnknownTag,

    /// Message ended before a required field
    Truncated,

    /// String field is not valid UTF-8
    InvalidUtf8,

    /// Field exceeds its size cap
    Oversized,

    /// Bytes remain after the end of the message
    TrailingBytes,
}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(kind: ProtocolErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Create an unknown tag error.
    pub fn unknown_tag(tag: u8) -> Self {
        Self::new(
            ProtocolErrorKind::UnknownTag,
            format!("unknown mutation tag: {}", tag),
        )
    }

    /// Create a truncation error.
    pub fn truncated(message: impl Into<String>) -> Self {
        Self::new(ProtocolErrorKind::Truncated, message)
    }

    /// Create an invalid UTF-8 error.
    pub fn invalid_utf8(message: impl Into<String>) -> Self {
        Self::new(ProtocolErrorKind::InvalidUtf8, message)
    }

    /// Create an oversized field error.
    pub fn oversized(message: impl Into<String>) -> Self {
        Self::new(ProtocolErrorKind::Oversized, message)
    }

    /// Create a trailing bytes error.
    pub fn trailing_bytes(remaining: usize) -> Self {
        Self::new(
            ProtocolErrorKind::TrailingBytes,
            format!("{} trailing bytes after message", remaining),
        )
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProtocolError({:?}): {}", self.kind, self.message)
    }
}

impl std::error::Error for ProtocolError {}

/// Result type for protocol operations
pub type ProtocolResult<T> = Result<T, ProtocolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_kind() {
        let err = ProtocolError::unknown_tag(9);
        let text = err.to_string();
        assert!(text.contains("UnknownTag"));
        assert!(text.contains('9'));
    }
}
