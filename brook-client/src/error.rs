//! Client error types.

use brook_protocol::{DecodeError, EncodeError, StatusCode};
use thiserror::Error;

/// Failures raised by a [`Transport`](crate::Transport).
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not connected")]
    NotConnected,

    #[error("connection closed")]
    ConnectionClosed,

    #[error("request timeout")]
    Timeout,

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("encoding error: {0}")]
    Encode(#[from] EncodeError),

    #[error("decoding error: {0}")]
    Decode(#[from] DecodeError),

    #[error("broker returned {0}")]
    Status(StatusCode),
}

/// Client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("encoding error: {0}")]
    Encode(#[from] EncodeError),

    #[error("decoding error: {0}")]
    Decode(#[from] DecodeError),

    #[error("server error: {status}")]
    Server { status: StatusCode },

    #[error("transport error: {0}")]
    Transport(TransportError),
}

impl ClientError {
    /// Returns the broker status when the broker rejected the request.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Server { status } => Some(*status),
            _ => None,
        }
    }

    /// Returns whether the broker rejected the request because the target is missing.
    pub fn is_not_found(&self) -> bool {
        self.status().is_some_and(|status| status.is_not_found())
    }
}

impl From<TransportError> for ClientError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Status(status) => ClientError::Server { status },
            TransportError::Encode(err) => ClientError::Encode(err),
            TransportError::Decode(err) => ClientError::Decode(err),
            other => ClientError::Transport(other),
        }
    }
}
