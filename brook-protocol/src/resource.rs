//! Capability trait shared by every manageable resource kind.

use crate::codec::ReadCursor;
use crate::command::Command;
use crate::error::{DecodeError, EncodeError};
use bytes::Bytes;

/// Command codes used by one resource kind's five operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceCommands {
    pub create: Command,
    pub get: Command,
    pub get_all: Command,
    pub update: Command,
    pub delete: Command,
}

/// Wire contract of a resource kind.
///
/// Implementations are pure: they build request payloads and parse response
/// bodies, and never touch the network.
pub trait ResourceKind {
    /// Request body of a create operation.
    type Create;
    /// Request body of an update operation.
    type Update;
    /// Entry type of a list response.
    type Summary;
    /// Full entity returned by get and create.
    type Details;

    /// Human-readable kind name used in logs.
    const KIND: &'static str;

    const COMMANDS: ResourceCommands;

    fn encode_create(request: &Self::Create) -> Result<Bytes, EncodeError>;

    fn encode_update(request: &Self::Update) -> Result<Bytes, EncodeError>;

    fn decode_summary(cursor: &mut ReadCursor) -> Result<Self::Summary, DecodeError>;

    fn decode_details(cursor: &mut ReadCursor) -> Result<Self::Details, DecodeError>;
}
