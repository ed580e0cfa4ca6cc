//! Resource identifiers.
//!
//! Wire layout:
//!
//! ```text
//! +--------+--------+------------------------------+
//! |  kind  | length | value                        |
//! | 1 byte | 1 byte | u32 LE (numeric) or UTF-8    |
//! +--------+--------+------------------------------+
//! ```

use crate::codec::ReadCursor;
use crate::error::{DecodeError, EncodeError};
use crate::MAX_NAME_LENGTH;
use bytes::{BufMut, Bytes, BytesMut};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

const KIND_NUMERIC: u8 = 1;
const KIND_STRING: u8 = 2;
const NUMERIC_LENGTH: u8 = 4;

/// Addresses an existing resource either by numeric id or by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Identifier {
    Numeric(u32),
    Named(String),
}

impl Identifier {
    pub fn numeric(id: u32) -> Self {
        Identifier::Numeric(id)
    }

    pub fn named(name: impl Into<String>) -> Self {
        Identifier::Named(name.into())
    }

    fn kind(&self) -> u8 {
        match self {
            Identifier::Numeric(_) => KIND_NUMERIC,
            Identifier::Named(_) => KIND_STRING,
        }
    }

    /// Encoded size in bytes.
    pub fn size(&self) -> usize {
        match self {
            Identifier::Numeric(_) => 2 + NUMERIC_LENGTH as usize,
            Identifier::Named(name) => 2 + name.len(),
        }
    }

    /// Checks that the identifier can be encoded.
    pub fn validate(&self) -> Result<(), EncodeError> {
        match self {
            Identifier::Numeric(_) => Ok(()),
            Identifier::Named(name) if name.is_empty() => Err(EncodeError::EmptyIdentifier),
            Identifier::Named(name) if name.len() > MAX_NAME_LENGTH => {
                Err(EncodeError::NameTooLong { len: name.len() })
            }
            Identifier::Named(_) => Ok(()),
        }
    }

    /// Appends the encoded identifier to `buf`.
    pub fn encode(&self, buf: &mut BytesMut) -> Result<(), EncodeError> {
        self.validate()?;
        buf.put_u8(self.kind());
        match self {
            Identifier::Numeric(id) => {
                buf.put_u8(NUMERIC_LENGTH);
                buf.put_u32_le(*id);
            }
            Identifier::Named(name) => {
                buf.put_u8(name.len() as u8);
                buf.put_slice(name.as_bytes());
            }
        }
        Ok(())
    }

    /// Encodes the identifier into a standalone buffer.
    pub fn to_bytes(&self) -> Result<Bytes, EncodeError> {
        let mut buf = BytesMut::with_capacity(self.size());
        self.encode(&mut buf)?;
        Ok(buf.freeze())
    }

    /// Reads an identifier from the front of the cursor.
    pub fn decode(cursor: &mut ReadCursor) -> Result<Self, DecodeError> {
        let kind = cursor.read_u8()?;
        let len = cursor.read_u8()?;
        match kind {
            KIND_NUMERIC => {
                if len != NUMERIC_LENGTH {
                    return Err(DecodeError::InvalidIdentifierLength { kind, len });
                }
                Ok(Identifier::Numeric(cursor.read_u32_le()?))
            }
            KIND_STRING => {
                if len == 0 {
                    return Err(DecodeError::InvalidIdentifierLength { kind, len });
                }
                let raw = cursor.read_bytes(len as usize)?;
                let name = String::from_utf8(raw.to_vec()).map_err(|_| DecodeError::InvalidUtf8)?;
                Ok(Identifier::Named(name))
            }
            other => Err(DecodeError::InvalidIdentifierKind(other)),
        }
    }
}

impl From<u32> for Identifier {
    fn from(id: u32) -> Self {
        Identifier::Numeric(id)
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Identifier::Named(name.to_string())
    }
}

impl From<String> for Identifier {
    fn from(name: String) -> Self {
        Identifier::Named(name)
    }
}

/// Parses a `u32` as a numeric identifier and anything else as a name.
impl FromStr for Identifier {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = match s.parse::<u32>() {
            Ok(id) => Identifier::Numeric(id),
            Err(_) => Identifier::Named(s.to_string()),
        };
        id.validate()?;
        Ok(id)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(id) => write!(f, "{}", id),
            Identifier::Named(name) => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_encoding() {
        let bytes = Identifier::numeric(1).to_bytes().unwrap();
        assert_eq!(bytes.as_ref(), &[0x01, 0x04, 0x01, 0x00, 0x00, 0x00][..]);
    }

    #[test]
    fn test_named_encoding() {
        let bytes = Identifier::named("orders").to_bytes().unwrap();
        assert_eq!(
            bytes.as_ref(),
            &[0x02, 0x06, 0x6F, 0x72, 0x64, 0x65, 0x72, 0x73][..]
        );
    }

    #[test]
    fn test_size_matches_encoding() {
        for id in [Identifier::numeric(42), Identifier::named("payments")] {
            assert_eq!(id.size(), id.to_bytes().unwrap().len());
        }
    }

    #[test]
    fn test_empty_name_rejected() {
        assert_eq!(
            Identifier::named("").to_bytes(),
            Err(EncodeError::EmptyIdentifier)
        );
    }

    #[test]
    fn test_long_name_rejected() {
        let id = Identifier::named("x".repeat(256));
        assert_eq!(id.to_bytes(), Err(EncodeError::NameTooLong { len: 256 }));
    }

    #[test]
    fn test_decode() {
        let mut buf = BytesMut::new();
        Identifier::numeric(7).encode(&mut buf).unwrap();
        Identifier::named("events").encode(&mut buf).unwrap();

        let mut cursor = ReadCursor::new(buf.freeze());
        assert_eq!(
            Identifier::decode(&mut cursor).unwrap(),
            Identifier::numeric(7)
        );
        assert_eq!(
            Identifier::decode(&mut cursor).unwrap(),
            Identifier::named("events")
        );
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_decode_invalid_kind() {
        let mut cursor = ReadCursor::new(Bytes::from_static(&[9, 1, 0]));
        assert_eq!(
            Identifier::decode(&mut cursor),
            Err(DecodeError::InvalidIdentifierKind(9))
        );
    }

    #[test]
    fn test_decode_invalid_numeric_length() {
        let mut cursor = ReadCursor::new(Bytes::from_static(&[1, 2, 0, 0]));
        assert_eq!(
            Identifier::decode(&mut cursor),
            Err(DecodeError::InvalidIdentifierLength { kind: 1, len: 2 })
        );
    }

    #[test]
    fn test_decode_truncated() {
        let mut cursor = ReadCursor::new(Bytes::from_static(&[1, 4, 0, 0]));
        assert!(matches!(
            Identifier::decode(&mut cursor),
            Err(DecodeError::Truncated { .. })
        ));
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "12".parse::<Identifier>().unwrap(),
            Identifier::numeric(12)
        );
        assert_eq!(
            "orders".parse::<Identifier>().unwrap(),
            Identifier::named("orders")
        );
        // Too large for u32, so it is a name
        assert_eq!(
            "4294967296".parse::<Identifier>().unwrap(),
            Identifier::named("4294967296")
        );
        assert!("".parse::<Identifier>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Identifier::numeric(3).to_string(), "3");
        assert_eq!(Identifier::named("logs").to_string(), "logs");
    }

    #[test]
    fn test_serialize() {
        assert_eq!(
            serde_json::to_string(&Identifier::numeric(5)).unwrap(),
            "5"
        );
        assert_eq!(
            serde_json::to_string(&Identifier::named("a")).unwrap(),
            "\"a\""
        );
    }
}
