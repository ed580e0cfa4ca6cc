//! Session payloads: user login.

use crate::codec::{self, ReadCursor};
use crate::error::{DecodeError, EncodeError};
use bytes::{Bytes, BytesMut};

/// Login request.
///
/// Layout: `u8 len + username`, `u8 len + password`, then the optional client
/// version and context, each as `u32 LE len + bytes` (length 0 when absent).
#[derive(Clone, PartialEq, Eq)]
pub struct LoginUser {
    pub username: String,
    pub password: String,
    pub version: Option<String>,
    pub context: Option<String>,
}

impl LoginUser {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            version: None,
            context: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn to_bytes(&self) -> Result<Bytes, EncodeError> {
        let version_len = self.version.as_deref().map_or(0, str::len);
        let context_len = self.context.as_deref().map_or(0, str::len);
        let mut buf = BytesMut::with_capacity(
            codec::name_size(&self.username)
                + codec::name_size(&self.password)
                + 8
                + version_len
                + context_len,
        );
        codec::put_name(&mut buf, &self.username)?;
        codec::put_name(&mut buf, &self.password)?;
        codec::put_long_string(&mut buf, self.version.as_deref());
        codec::put_long_string(&mut buf, self.context.as_deref());
        Ok(buf.freeze())
    }
}

// Keep the password out of logs.
impl std::fmt::Debug for LoginUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginUser")
            .field("username", &self.username)
            .field("password", &"***")
            .field("version", &self.version)
            .field("context", &self.context)
            .finish()
    }
}

/// Login response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityInfo {
    pub user_id: u32,
}

impl IdentityInfo {
    pub fn decode(cursor: &mut ReadCursor) -> Result<Self, DecodeError> {
        Ok(Self {
            user_id: cursor.read_u32_le()?,
        })
    }
}
