//! Little-endian binary codec primitives.
//!
//! Encoding helpers write into a `BytesMut`. Decoding goes through
//! [`ReadCursor`], which checks the remaining length before every read so a
//! short buffer surfaces as [`DecodeError::Truncated`] instead of a panic.

use crate::error::{DecodeError, EncodeError};
use crate::MAX_NAME_LENGTH;
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Size of an encoded name with the given byte length (length prefix included).
pub fn name_size(name: &str) -> usize {
    1 + name.len()
}

/// Checks that a name fits into a single-byte length prefix.
pub fn validate_name(name: &str) -> Result<(), EncodeError> {
    if name.len() > MAX_NAME_LENGTH {
        return Err(EncodeError::NameTooLong { len: name.len() });
    }
    Ok(())
}

/// Writes `u8 len` followed by the raw UTF-8 bytes of `name`.
pub fn put_name(buf: &mut BytesMut, name: &str) -> Result<(), EncodeError> {
    validate_name(name)?;
    buf.put_u8(name.len() as u8);
    buf.put_slice(name.as_bytes());
    Ok(())
}

/// Writes an optional numeric id, with `None` encoded as zero.
pub fn put_optional_id(buf: &mut BytesMut, id: Option<u32>) {
    buf.put_u32_le(id.unwrap_or(0));
}

/// Writes `u32 LE len` followed by the bytes of `value` (empty when absent).
pub fn put_long_string(buf: &mut BytesMut, value: Option<&str>) {
    let value = value.unwrap_or_default();
    buf.put_u32_le(value.len() as u32);
    buf.put_slice(value.as_bytes());
}

/// Forward-only read cursor over a response buffer.
#[derive(Debug, Clone)]
pub struct ReadCursor {
    buf: Bytes,
}

impl ReadCursor {
    pub fn new(buf: Bytes) -> Self {
        Self { buf }
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    fn ensure(&self, needed: usize) -> Result<(), DecodeError> {
        if self.buf.len() < needed {
            return Err(DecodeError::Truncated {
                needed,
                remaining: self.buf.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        self.ensure(1)?;
        Ok(self.buf.get_u8())
    }

    pub fn read_u32_le(&mut self) -> Result<u32, DecodeError> {
        self.ensure(4)?;
        Ok(self.buf.get_u32_le())
    }

    pub fn read_u64_le(&mut self) -> Result<u64, DecodeError> {
        self.ensure(8)?;
        Ok(self.buf.get_u64_le())
    }

    /// Splits off the next `len` bytes without copying.
    pub fn read_bytes(&mut self, len: usize) -> Result<Bytes, DecodeError> {
        self.ensure(len)?;
        Ok(self.buf.split_to(len))
    }

    /// Reads a `u8`-length-prefixed UTF-8 name.
    pub fn read_name(&mut self) -> Result<String, DecodeError> {
        let len = self.read_u8()? as usize;
        let raw = self.read_bytes(len)?;
        String::from_utf8(raw.to_vec()).map_err(|_| DecodeError::InvalidUtf8)
    }

    /// Returns the unread bytes, consuming the cursor.
    pub fn into_remaining(self) -> Bytes {
        self.buf
    }
}

impl From<Bytes> for ReadCursor {
    fn from(buf: Bytes) -> Self {
        Self::new(buf)
    }
}
