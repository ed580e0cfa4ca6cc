//! High-level client API.

use crate::adapter::StreamClient;
use crate::connection::{ConnectionConfig, TcpTransport};
use crate::error::ClientError;
use crate::transport::Transport;
use brook_protocol::command::Command;
use bytes::Bytes;

/// High-level client for the broker.
pub struct Client<T = TcpTransport> {
    transport: T,
}

impl Client<TcpTransport> {
    /// Connects over TCP (and logs in when credentials are configured).
    pub fn connect(config: ConnectionConfig) -> Result<Self, ClientError> {
        let transport = TcpTransport::connect(config)?;
        Ok(Self { transport })
    }

    /// Closes the connection.
    pub fn close(&self) {
        self.transport.close();
    }
}

impl<T: Transport> Client<T> {
    /// Wraps an already established transport.
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Stream management operations.
    pub fn streams(&self) -> StreamClient<&T> {
        StreamClient::new(&self.transport)
    }

    /// Pings the broker.
    pub fn ping(&self) -> Result<(), ClientError> {
        self.transport.send(Command::Ping.code(), Bytes::new())?;
        Ok(())
    }
}
