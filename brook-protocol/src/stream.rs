//! Stream management wire types.
//!
//! Stream record layout (list entry, and head of a details response):
//!
//! ```text
//! +--------+------------+--------------+------------+----------------+----------+------+
//! | id     | created_at | topics_count | size_bytes | messages_count | name_len | name |
//! | u32 LE | u64 LE     | u32 LE       | u64 LE     | u64 LE         | u8       |      |
//! +--------+------------+--------------+------------+----------------+----------+------+
//! ```
//!
//! A details response continues with up to `topics_count` topic records.
//! Anything after the last record is left unread:
//!
//! ```text
//! +--------+------------+------------------+----------------+-------------+
//! | id     | created_at | partitions_count | message_expiry | compression |
//! | u32 LE | u64 LE     | u32 LE           | u64 LE         | u8          |
//! +--------+------------+------------------+----------------+-------------+
//! | max_topic_size | replication_factor | size_bytes | messages_count | name_len | name |
//! | u64 LE         | u8                 | u64 LE     | u64 LE         | u8       |      |
//! +----------------+--------------------+------------+----------------+----------+------+
//! ```

use crate::codec::{self, ReadCursor};
use crate::command::Command;
use crate::error::{DecodeError, EncodeError};
use crate::identifier::Identifier;
use crate::resource::{ResourceCommands, ResourceKind};
use bytes::{BufMut, Bytes, BytesMut};
use serde::Serialize;

/// Fixed-size prefix of a stream record, before the name.
pub const STREAM_RECORD_PREFIX_SIZE: usize = 4 + 8 + 4 + 8 + 8;

/// Fixed-size prefix of a topic record, before the name.
pub const TOPIC_RECORD_PREFIX_SIZE: usize = 4 + 8 + 4 + 8 + 1 + 8 + 1 + 8 + 8;

/// Stream entry as returned by a list query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamSummary {
    pub id: u32,
    /// Creation time in microseconds since the Unix epoch.
    pub created_at: u64,
    pub topics_count: u32,
    pub size_bytes: u64,
    pub messages_count: u64,
    pub name: String,
}

impl StreamSummary {
    pub fn decode(cursor: &mut ReadCursor) -> Result<Self, DecodeError> {
        Ok(Self {
            id: cursor.read_u32_le()?,
            created_at: cursor.read_u64_le()?,
            topics_count: cursor.read_u32_le()?,
            size_bytes: cursor.read_u64_le()?,
            messages_count: cursor.read_u64_le()?,
            name: cursor.read_name()?,
        })
    }

    /// Writes the record in the broker's layout.
    pub fn encode(&self, buf: &mut BytesMut) -> Result<(), EncodeError> {
        buf.put_u32_le(self.id);
        buf.put_u64_le(self.created_at);
        buf.put_u32_le(self.topics_count);
        buf.put_u64_le(self.size_bytes);
        buf.put_u64_le(self.messages_count);
        codec::put_name(buf, &self.name)
    }
}

/// Topic compression setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionAlgorithm {
    #[default]
    None,
    Gzip,
}

impl CompressionAlgorithm {
    pub fn as_code(&self) -> u8 {
        match self {
            CompressionAlgorithm::None => 1,
            CompressionAlgorithm::Gzip => 2,
        }
    }

    pub fn from_code(code: u8) -> Result<Self, DecodeError> {
        match code {
            1 => Ok(CompressionAlgorithm::None),
            2 => Ok(CompressionAlgorithm::Gzip),
            other => Err(DecodeError::UnknownCompression(other)),
        }
    }
}

/// Topic entry embedded in a stream details response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicSummary {
    pub id: u32,
    pub created_at: u64,
    pub partitions_count: u32,
    /// Message expiry in microseconds. 0 is the broker default, `u64::MAX` never expires.
    pub message_expiry: u64,
    pub compression: CompressionAlgorithm,
    /// Maximum topic size in bytes. 0 is the broker default, `u64::MAX` is unlimited.
    pub max_topic_size: u64,
    pub replication_factor: u8,
    pub size_bytes: u64,
    pub messages_count: u64,
    pub name: String,
}

impl TopicSummary {
    pub fn decode(cursor: &mut ReadCursor) -> Result<Self, DecodeError> {
        Ok(Self {
            id: cursor.read_u32_le()?,
            created_at: cursor.read_u64_le()?,
            partitions_count: cursor.read_u32_le()?,
            message_expiry: cursor.read_u64_le()?,
            compression: CompressionAlgorithm::from_code(cursor.read_u8()?)?,
            max_topic_size: cursor.read_u64_le()?,
            replication_factor: cursor.read_u8()?,
            size_bytes: cursor.read_u64_le()?,
            messages_count: cursor.read_u64_le()?,
            name: cursor.read_name()?,
        })
    }

    pub fn encode(&self, buf: &mut BytesMut) -> Result<(), EncodeError> {
        buf.put_u32_le(self.id);
        buf.put_u64_le(self.created_at);
        buf.put_u32_le(self.partitions_count);
        buf.put_u64_le(self.message_expiry);
        buf.put_u8(self.compression.as_code());
        buf.put_u64_le(self.max_topic_size);
        buf.put_u8(self.replication_factor);
        buf.put_u64_le(self.size_bytes);
        buf.put_u64_le(self.messages_count);
        codec::put_name(buf, &self.name)
    }
}

/// Full stream entity returned by get and create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamDetails {
    #[serde(flatten)]
    pub stream: StreamSummary,
    pub topics: Vec<TopicSummary>,
}

impl StreamDetails {
    pub fn decode(cursor: &mut ReadCursor) -> Result<Self, DecodeError> {
        let stream = StreamSummary::decode(cursor)?;
        let capacity = (stream.topics_count as usize)
            .min(cursor.remaining() / (TOPIC_RECORD_PREFIX_SIZE + 1));
        let mut topics = Vec::with_capacity(capacity);
        for _ in 0..stream.topics_count {
            if cursor.is_empty() {
                break;
            }
            topics.push(TopicSummary::decode(cursor)?);
        }
        Ok(Self { stream, topics })
    }

    pub fn encode(&self, buf: &mut BytesMut) -> Result<(), EncodeError> {
        self.stream.encode(buf)?;
        for topic in &self.topics {
            topic.encode(buf)?;
        }
        Ok(())
    }

    pub fn id(&self) -> u32 {
        self.stream.id
    }

    pub fn name(&self) -> &str {
        &self.stream.name
    }
}

/// Create-stream request.
///
/// The broker's layout has no presence flag for the id: `None` is sent as 0,
/// so "let the broker assign" and "explicitly use id 0" are indistinguishable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateStream {
    pub stream_id: Option<u32>,
    pub name: String,
}

impl CreateStream {
    pub fn new(stream_id: Option<u32>, name: impl Into<String>) -> Self {
        Self {
            stream_id,
            name: name.into(),
        }
    }

    pub fn to_bytes(&self) -> Result<Bytes, EncodeError> {
        let mut buf = BytesMut::with_capacity(4 + codec::name_size(&self.name));
        codec::put_optional_id(&mut buf, self.stream_id);
        codec::put_name(&mut buf, &self.name)?;
        Ok(buf.freeze())
    }
}

/// Rename-stream request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStream {
    pub stream_id: Identifier,
    pub name: String,
}

impl UpdateStream {
    pub fn new(stream_id: impl Into<Identifier>, name: impl Into<String>) -> Self {
        Self {
            stream_id: stream_id.into(),
            name: name.into(),
        }
    }

    pub fn to_bytes(&self) -> Result<Bytes, EncodeError> {
        let mut buf =
            BytesMut::with_capacity(self.stream_id.size() + codec::name_size(&self.name));
        self.stream_id.encode(&mut buf)?;
        codec::put_name(&mut buf, &self.name)?;
        Ok(buf.freeze())
    }
}

/// Stream resource kind.
#[derive(Debug, Clone, Copy)]
pub struct Streams;

impl ResourceKind for Streams {
    type Create = CreateStream;
    type Update = UpdateStream;
    type Summary = StreamSummary;
    type Details = StreamDetails;

    const KIND: &'static str = "stream";

    const COMMANDS: ResourceCommands = ResourceCommands {
        create: Command::CreateStream,
        get: Command::GetStream,
        get_all: Command::GetStreams,
        update: Command::UpdateStream,
        delete: Command::DeleteStream,
    };

    fn encode_create(request: &CreateStream) -> Result<Bytes, EncodeError> {
        request.to_bytes()
    }

    fn encode_update(request: &UpdateStream) -> Result<Bytes, EncodeError> {
        request.to_bytes()
    }

    fn decode_summary(cursor: &mut ReadCursor) -> Result<StreamSummary, DecodeError> {
        StreamSummary::decode(cursor)
    }

    fn decode_details(cursor: &mut ReadCursor) -> Result<StreamDetails, DecodeError> {
        StreamDetails::decode(cursor)
    }
}
