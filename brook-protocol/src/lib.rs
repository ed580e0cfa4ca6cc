//! # brook-protocol
//!
//! Binary wire protocol for talking to the broker.
//!
//! This crate provides:
//! - A bounds-checked read cursor and little-endian encoding helpers
//! - Resource identifiers (numeric or by name)
//! - The frozen command table
//! - Stream and topic wire types, plus the resource capability trait
//! - Request/response frame layout used by the TCP transport
//! - Error types and broker status codes

pub mod codec;
pub mod command;
pub mod error;
pub mod frame;
pub mod identifier;
pub mod resource;
pub mod session;
pub mod stream;

pub use codec::ReadCursor;
pub use command::Command;
pub use error::{DecodeError, EncodeError, StatusCode};
pub use frame::{RequestFrame, ResponseHeader, REQUEST_HEADER_SIZE, RESPONSE_HEADER_SIZE};
pub use identifier::Identifier;
pub use resource::{ResourceCommands, ResourceKind};
pub use session::{IdentityInfo, LoginUser};
pub use stream::{
    CompressionAlgorithm, CreateStream, StreamDetails, StreamSummary, Streams, TopicSummary,
    UpdateStream,
};

/// Default TCP port of the broker.
pub const DEFAULT_PORT: u16 = 8090;

/// Maximum byte length of a length-prefixed name.
pub const MAX_NAME_LENGTH: usize = 255;

/// Maximum response payload size accepted by the transport (64 MiB).
pub const MAX_RESPONSE_SIZE: u32 = 64 * 1024 * 1024;
