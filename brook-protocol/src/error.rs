//! Codec error types and broker status codes.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Caller-supplied data that cannot be represented on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("name too long: {len} bytes (max 255)")]
    NameTooLong { len: usize },

    #[error("identifier name cannot be empty")]
    EmptyIdentifier,
}

/// Response bytes that do not match the expected layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("truncated buffer: need {needed} bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    #[error("invalid UTF-8 in name field")]
    InvalidUtf8,

    #[error("invalid identifier kind: {0}")]
    InvalidIdentifierKind(u8),

    #[error("invalid identifier length {len} for kind {kind}")]
    InvalidIdentifierLength { kind: u8, len: u8 },

    #[error("unknown compression algorithm code: {0}")]
    UnknownCompression(u8),

    #[error("response too large: {size} bytes (max {max})")]
    ResponseTooLarge { size: u32, max: u32 },
}

/// Status code reported by the broker in a response header.
///
/// Zero means success. The broker defines many more codes than are named
/// here; unknown codes are carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusCode(pub u32);

impl StatusCode {
    pub const OK: StatusCode = StatusCode(0);
    pub const ERROR: StatusCode = StatusCode(1);
    pub const INVALID_COMMAND: StatusCode = StatusCode(3);
    pub const INVALID_FORMAT: StatusCode = StatusCode(4);
    pub const UNAUTHENTICATED: StatusCode = StatusCode(40);
    pub const UNAUTHORIZED: StatusCode = StatusCode(41);
    pub const INVALID_CREDENTIALS: StatusCode = StatusCode(42);
    pub const STREAM_ID_NOT_FOUND: StatusCode = StatusCode(1009);
    pub const STREAM_NAME_NOT_FOUND: StatusCode = StatusCode(1010);
    pub const STREAM_ID_ALREADY_EXISTS: StatusCode = StatusCode(1011);
    pub const STREAM_NAME_ALREADY_EXISTS: StatusCode = StatusCode(1012);

    pub fn code(&self) -> u32 {
        self.0
    }

    pub fn is_ok(&self) -> bool {
        self.0 == 0
    }

    /// Returns whether the broker rejected the request because the target is missing.
    pub fn is_not_found(&self) -> bool {
        matches!(
            *self,
            StatusCode::STREAM_ID_NOT_FOUND | StatusCode::STREAM_NAME_NOT_FOUND
        )
    }

    /// Returns the symbolic name of a well-known status.
    pub fn name(&self) -> Option<&'static str> {
        let name = match *self {
            StatusCode::OK => "OK",
            StatusCode::ERROR => "ERROR",
            StatusCode::INVALID_COMMAND => "INVALID_COMMAND",
            StatusCode::INVALID_FORMAT => "INVALID_FORMAT",
            StatusCode::UNAUTHENTICATED => "UNAUTHENTICATED",
            StatusCode::UNAUTHORIZED => "UNAUTHORIZED",
            StatusCode::INVALID_CREDENTIALS => "INVALID_CREDENTIALS",
            StatusCode::STREAM_ID_NOT_FOUND => "STREAM_ID_NOT_FOUND",
            StatusCode::STREAM_NAME_NOT_FOUND => "STREAM_NAME_NOT_FOUND",
            StatusCode::STREAM_ID_ALREADY_EXISTS => "STREAM_ID_ALREADY_EXISTS",
            StatusCode::STREAM_NAME_ALREADY_EXISTS => "STREAM_NAME_ALREADY_EXISTS",
            _ => return None,
        };
        Some(name)
    }
}

impl From<u32> for StatusCode {
    fn from(code: u32) -> Self {
        StatusCode(code)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} ({})", name, self.0),
            None => write!(f, "status {}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_not_found() {
        assert!(StatusCode::STREAM_ID_NOT_FOUND.is_not_found());
        assert!(StatusCode::STREAM_NAME_NOT_FOUND.is_not_found());

        assert!(!StatusCode::OK.is_not_found());
        assert!(!StatusCode::STREAM_NAME_ALREADY_EXISTS.is_not_found());
        assert!(!StatusCode(7777).is_not_found());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(StatusCode::OK.to_string(), "OK (0)");
        assert_eq!(
            StatusCode::STREAM_NAME_ALREADY_EXISTS.to_string(),
            "STREAM_NAME_ALREADY_EXISTS (1012)"
        );
        assert_eq!(StatusCode(7777).to_string(), "status 7777");
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&StatusCode::UNAUTHENTICATED).unwrap();
        assert_eq!(json, "40");

        let parsed: StatusCode = serde_json::from_str("1009").unwrap();
        assert_eq!(parsed, StatusCode::STREAM_ID_NOT_FOUND);
    }

    #[test]
    fn test_error_display() {
        let err = EncodeError::NameTooLong { len: 300 };
        let msg = err.to_string();
        assert!(msg.contains("300"));
        assert!(msg.contains("255"));

        let err = DecodeError::Truncated {
            needed: 8,
            remaining: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains('8'));
        assert!(msg.contains('3'));

        let err = DecodeError::UnknownCompression(9);
        assert!(err.to_string().contains('9'));

        assert!(DecodeError::InvalidUtf8.to_string().contains("UTF-8"));
    }
}
