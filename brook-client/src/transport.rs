//! Transport abstraction.
//!
//! A transport delivers one command to the broker and returns the raw
//! response body. It owns the connection, timeouts and mutual exclusion;
//! callers above it are stateless.

use crate::error::TransportError;
use bytes::Bytes;
use std::sync::Arc;

/// Sends a single request and blocks until its response arrives.
pub trait Transport {
    /// Sends `payload` under `command`.
    ///
    /// Returns the response body (possibly empty) on success. A non-zero
    /// broker status fails with [`TransportError::Status`].
    fn send(&self, command: u32, payload: Bytes) -> Result<Bytes, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, command: u32, payload: Bytes) -> Result<Bytes, TransportError> {
        (**self).send(command, payload)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, command: u32, payload: Bytes) -> Result<Bytes, TransportError> {
        (**self).send(command, payload)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, command: u32, payload: Bytes) -> Result<Bytes, TransportError> {
        (**self).send(command, payload)
    }
}
