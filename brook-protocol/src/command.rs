//! Command table.
//!
//! Command codes select the broker-side handler for a request. They are part
//! of the protocol contract and must match the broker's revision exactly.

use std::fmt;

pub const PING_CODE: u32 = 1;
pub const LOGIN_USER_CODE: u32 = 38;
pub const LOGOUT_USER_CODE: u32 = 39;
pub const GET_STREAM_CODE: u32 = 200;
pub const GET_STREAMS_CODE: u32 = 201;
pub const CREATE_STREAM_CODE: u32 = 202;
pub const DELETE_STREAM_CODE: u32 = 203;
pub const UPDATE_STREAM_CODE: u32 = 204;

/// Commands understood by this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Ping,
    LoginUser,
    LogoutUser,
    GetStream,
    GetStreams,
    CreateStream,
    DeleteStream,
    UpdateStream,
}

impl Command {
    pub const ALL: [Command; 8] = [
        Command::Ping,
        Command::LoginUser,
        Command::LogoutUser,
        Command::GetStream,
        Command::GetStreams,
        Command::CreateStream,
        Command::DeleteStream,
        Command::UpdateStream,
    ];

    pub fn code(&self) -> u32 {
        match self {
            Command::Ping => PING_CODE,
            Command::LoginUser => LOGIN_USER_CODE,
            Command::LogoutUser => LOGOUT_USER_CODE,
            Command::GetStream => GET_STREAM_CODE,
            Command::GetStreams => GET_STREAMS_CODE,
            Command::CreateStream => CREATE_STREAM_CODE,
            Command::DeleteStream => DELETE_STREAM_CODE,
            Command::UpdateStream => UPDATE_STREAM_CODE,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Ping => "ping",
            Command::LoginUser => "user.login",
            Command::LogoutUser => "user.logout",
            Command::GetStream => "stream.get",
            Command::GetStreams => "stream.list",
            Command::CreateStream => "stream.create",
            Command::DeleteStream => "stream.delete",
            Command::UpdateStream => "stream.update",
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.code() == code)
    }
}

/// Returns a printable name for a raw command code.
pub fn command_name(code: u32) -> &'static str {
    Command::from_code(code)
        .map(|command| command.name())
        .unwrap_or("unknown")
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name(), self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_stream_codes() {
        assert_eq!(Command::GetStream.code(), 200);
        assert_eq!(Command::GetStreams.code(), 201);
        assert_eq!(Command::CreateStream.code(), 202);
        assert_eq!(Command::DeleteStream.code(), 203);
        assert_eq!(Command::UpdateStream.code(), 204);
    }

    #[test]
    fn test_codes_unique() {
        let codes: HashSet<u32> = Command::ALL.iter().map(|c| c.code()).collect();
        assert_eq!(codes.len(), Command::ALL.len());
    }

    #[test]
    fn test_from_code() {
        for command in Command::ALL {
            assert_eq!(Command::from_code(command.code()), Some(command));
        }
        assert_eq!(Command::from_code(9999), None);
    }

    #[test]
    fn test_command_name() {
        assert_eq!(command_name(202), "stream.create");
        assert_eq!(command_name(9999), "unknown");
        assert_eq!(Command::Ping.to_string(), "ping:1");
    }
}
