//! Transport frame layout.
//!
//! Request (client to broker):
//!
//! ```text
//! +-------------+---------+-----------------+
//! | length      | command | payload         |
//! | u32 LE      | u32 LE  | length - 4 bytes|
//! +-------------+---------+-----------------+
//! ```
//!
//! Response (broker to client):
//!
//! ```text
//! +---------+---------+-----------------+
//! | status  | length  | payload         |
//! | u32 LE  | u32 LE  | length bytes    |
//! +---------+---------+-----------------+
//! ```

use crate::error::{DecodeError, StatusCode};
use crate::MAX_RESPONSE_SIZE;
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Size of the request header (length + command).
pub const REQUEST_HEADER_SIZE: usize = 8;

/// Size of the response header (status + length).
pub const RESPONSE_HEADER_SIZE: usize = 8;

/// A request ready to be written to the socket.
#[derive(Debug, Clone)]
pub struct RequestFrame {
    pub command: u32,
    pub payload: Bytes,
}

impl RequestFrame {
    pub fn new(command: u32, payload: Bytes) -> Self {
        Self { command, payload }
    }

    /// Encodes the frame. The length field counts the command code and payload.
    pub fn encode(&self) -> BytesMut {
        let mut buf = BytesMut::with_capacity(REQUEST_HEADER_SIZE + self.payload.len());
        buf.put_u32_le(4 + self.payload.len() as u32);
        buf.put_u32_le(self.command);
        buf.put_slice(&self.payload);
        buf
    }
}

/// Parsed response header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseHeader {
    pub status: StatusCode,
    pub length: u32,
}

impl ResponseHeader {
    pub fn ok(length: u32) -> Self {
        Self {
            status: StatusCode::OK,
            length,
        }
    }

    pub fn error(status: StatusCode) -> Self {
        Self { status, length: 0 }
    }

    /// Parses a header, rejecting payload lengths above [`MAX_RESPONSE_SIZE`].
    pub fn decode(raw: &[u8; RESPONSE_HEADER_SIZE]) -> Result<Self, DecodeError> {
        let mut buf = &raw[..];
        let status = buf.get_u32_le();
        let length = buf.get_u32_le();
        if length > MAX_RESPONSE_SIZE {
            return Err(DecodeError::ResponseTooLarge {
                size: length,
                max: MAX_RESPONSE_SIZE,
            });
        }
        Ok(Self {
            status: StatusCode(status),
            length,
        })
    }

    pub fn encode(&self) -> [u8; RESPONSE_HEADER_SIZE] {
        let mut raw = [0u8; RESPONSE_HEADER_SIZE];
        raw[..4].copy_from_slice(&self.status.code().to_le_bytes());
        raw[4..].copy_from_slice(&self.length.to_le_bytes());
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CREATE_STREAM_CODE;

    #[test]
    fn test_request_frame_layout() {
        let payload = Bytes::from_static(&[0, 0, 0, 0, 1, b'a']);
        let encoded = RequestFrame::new(CREATE_STREAM_CODE, payload.clone()).encode();

        assert_eq!(encoded.len(), REQUEST_HEADER_SIZE + payload.len());
        assert_eq!(&encoded[0..4], &10u32.to_le_bytes());
        assert_eq!(&encoded[4..8], &[0xCA, 0x00, 0x00, 0x00]);
        assert_eq!(&encoded[8..], payload.as_ref());
    }

    #[test]
    fn test_request_frame_empty_payload() {
        let encoded = RequestFrame::new(201, Bytes::new()).encode();
        assert_eq!(encoded.as_ref(), &[4, 0, 0, 0, 201, 0, 0, 0][..]);
    }

    #[test]
    fn test_response_header_decode() {
        let raw = [0xF1, 0x03, 0, 0, 0, 0, 0, 0];
        let header = ResponseHeader::decode(&raw).unwrap();
        assert_eq!(header.status, StatusCode(1009));
        assert_eq!(header.length, 0);
    }

    #[test]
    fn test_response_header_encode() {
        let header = ResponseHeader::ok(33);
        let raw = header.encode();
        assert_eq!(raw, [0, 0, 0, 0, 33, 0, 0, 0]);
        assert_eq!(ResponseHeader::decode(&raw).unwrap(), header);

        let raw = ResponseHeader::error(StatusCode::UNAUTHENTICATED).encode();
        assert_eq!(raw, [40, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_response_too_large() {
        let mut raw = [0u8; RESPONSE_HEADER_SIZE];
        raw[4..].copy_from_slice(&(MAX_RESPONSE_SIZE + 1).to_le_bytes());
        assert!(matches!(
            ResponseHeader::decode(&raw),
            Err(DecodeError::ResponseTooLarge { .. })
        ));
    }
}
