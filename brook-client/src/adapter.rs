//! Resource adapter: one request/response cycle per operation.

use crate::error::ClientError;
use crate::transport::Transport;
use brook_protocol::command::Command;
use brook_protocol::{Identifier, ReadCursor, ResourceKind, Streams};
use bytes::Bytes;
use std::marker::PhantomData;

/// Adapter for stream management.
pub type StreamClient<T> = ResourceAdapter<T, Streams>;

/// Turns the five management operations of resource kind `K` into broker
/// requests over transport `T`.
///
/// The adapter holds no state between calls. Payloads are fully encoded
/// before the transport is invoked, so invalid input never reaches the wire.
pub struct ResourceAdapter<T, K> {
    transport: T,
    _kind: PhantomData<fn() -> K>,
}

impl<T: Transport, K: ResourceKind> ResourceAdapter<T, K> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            _kind: PhantomData,
        }
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn send(&self, command: Command, payload: Bytes) -> Result<Bytes, ClientError> {
        tracing::debug!(
            kind = K::KIND,
            command = %command,
            payload_len = payload.len(),
            "sending request"
        );
        match self.transport.send(command.code(), payload) {
            Ok(body) => {
                tracing::debug!(kind = K::KIND, command = %command, body_len = body.len(), "response received");
                Ok(body)
            }
            Err(err) => {
                let err = ClientError::from(err);
                if let Some(status) = err.status() {
                    tracing::warn!(kind = K::KIND, command = %command, %status, "request rejected by broker");
                }
                Err(err)
            }
        }
    }

    /// Creates a resource and returns it as stored by the broker.
    pub fn create(&self, request: &K::Create) -> Result<K::Details, ClientError> {
        let payload = K::encode_create(request)?;
        let body = self.send(K::COMMANDS.create, payload)?;
        let mut cursor = ReadCursor::new(body);
        Ok(K::decode_details(&mut cursor)?)
    }

    /// Fetches a resource. An empty response means it does not exist.
    pub fn get(&self, id: &Identifier) -> Result<Option<K::Details>, ClientError> {
        let payload = id.to_bytes()?;
        let body = self.send(K::COMMANDS.get, payload)?;
        if body.is_empty() {
            tracing::debug!(kind = K::KIND, %id, "not found");
            return Ok(None);
        }
        let mut cursor = ReadCursor::new(body);
        let details = K::decode_details(&mut cursor)?;
        let trailing = cursor.into_remaining();
        if !trailing.is_empty() {
            tracing::trace!(
                kind = K::KIND,
                trailing = trailing.len(),
                "ignoring trailing bytes"
            );
        }
        Ok(Some(details))
    }

    /// Lists all resources in the order the broker returned them.
    pub fn list(&self) -> Result<Vec<K::Summary>, ClientError> {
        let body = self.send(K::COMMANDS.get_all, Bytes::new())?;
        let mut cursor = ReadCursor::new(body);
        let mut items = Vec::new();
        while !cursor.is_empty() {
            items.push(K::decode_summary(&mut cursor)?);
        }
        Ok(items)
    }

    /// Applies an update. The response body is discarded.
    pub fn update(&self, request: &K::Update) -> Result<(), ClientError> {
        let payload = K::encode_update(request)?;
        let body = self.send(K::COMMANDS.update, payload)?;
        tracing::trace!(kind = K::KIND, discarded = body.len(), "update acknowledged");
        Ok(())
    }

    /// Deletes a resource. The response body is discarded.
    pub fn delete(&self, id: &Identifier) -> Result<(), ClientError> {
        let payload = id.to_bytes()?;
        let body = self.send(K::COMMANDS.delete, payload)?;
        tracing::trace!(kind = K::KIND, discarded = body.len(), "delete acknowledged");
        Ok(())
    }
}
