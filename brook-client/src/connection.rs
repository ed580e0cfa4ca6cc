//! Blocking TCP transport.

use crate::error::TransportError;
use crate::transport::Transport;
use brook_protocol::command::{command_name, Command};
use brook_protocol::{
    IdentityInfo, LoginUser, ReadCursor, RequestFrame, ResponseHeader, RESPONSE_HEADER_SIZE,
};
use bytes::Bytes;
use parking_lot::Mutex;
use std::io::{ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Username and password used to log in after connecting.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Connection configuration.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Broker address.
    pub addr: SocketAddr,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Read and write timeout for a single request.
    pub request_timeout: Duration,
    /// Disable Nagle's algorithm.
    pub nodelay: bool,
    /// Credentials for logging in on connect (optional).
    pub credentials: Option<Credentials>,
    /// Client version sent with the login request.
    pub client_version: Option<String>,
}

impl ConnectionConfig {
    pub fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            nodelay: true,
            credentials: None,
            client_version: None,
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_nodelay(mut self, nodelay: bool) -> Self {
        self.nodelay = nodelay;
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_client_version(mut self, version: impl Into<String>) -> Self {
        self.client_version = Some(version.into());
        self
    }
}

/// A transport over one blocking TCP connection.
///
/// The socket sits behind a mutex, so a transport shared between threads
/// still carries exactly one request at a time.
pub struct TcpTransport {
    config: ConnectionConfig,
    stream: Mutex<Option<TcpStream>>,
    logged_in: AtomicBool,
}

impl TcpTransport {
    /// Creates a transport that is not yet connected.
    pub fn new(config: ConnectionConfig) -> Self {
        Self {
            config,
            stream: Mutex::new(None),
            logged_in: AtomicBool::new(false),
        }
    }

    /// Connects and, when credentials are configured, logs in.
    pub fn connect(config: ConnectionConfig) -> Result<Self, TransportError> {
        let transport = Self::new(config);
        transport.open()?;
        if let Some(credentials) = transport.config.credentials.clone() {
            transport.login(&credentials)?;
        }
        Ok(transport)
    }

    /// Opens the TCP connection, replacing any previous one.
    pub fn open(&self) -> Result<(), TransportError> {
        tracing::debug!("Connecting to {}...", self.config.addr);

        let stream = TcpStream::connect_timeout(&self.config.addr, self.config.connect_timeout)
            .map_err(|e| {
                tracing::debug!("Connection failed: {}", e);
                map_io_error(e)
            })?;

        stream.set_nodelay(self.config.nodelay)?;
        stream.set_read_timeout(Some(self.config.request_timeout))?;
        stream.set_write_timeout(Some(self.config.request_timeout))?;

        *self.stream.lock() = Some(stream);
        tracing::debug!("Connected to {}", self.config.addr);
        Ok(())
    }

    /// Logs in with the given credentials and returns the broker's user id.
    pub fn login(&self, credentials: &Credentials) -> Result<IdentityInfo, TransportError> {
        let mut request = LoginUser::new(&credentials.username, &credentials.password);
        if let Some(ref version) = self.config.client_version {
            request = request.with_version(version);
        }
        let payload = request.to_bytes()?;

        tracing::debug!("Logging in as {}", credentials.username);
        let body = self.send(Command::LoginUser.code(), payload)?;
        let identity = IdentityInfo::decode(&mut ReadCursor::new(body))?;
        self.logged_in.store(true, Ordering::Release);
        tracing::debug!("Logged in, user id {}", identity.user_id);
        Ok(identity)
    }

    /// Ends the logged-in session while keeping the connection open.
    pub fn logout(&self) -> Result<(), TransportError> {
        self.send(Command::LogoutUser.code(), Bytes::new())?;
        self.logged_in.store(false, Ordering::Release);
        tracing::debug!("Logged out");
        Ok(())
    }

    /// Sends a ping.
    pub fn ping(&self) -> Result<(), TransportError> {
        self.send(Command::Ping.code(), Bytes::new())?;
        Ok(())
    }

    /// Returns whether a socket is open.
    pub fn is_connected(&self) -> bool {
        self.stream.lock().is_some()
    }

    /// Closes the connection, logging out first when a session is active.
    pub fn close(&self) {
        if let Some(mut stream) = self.stream.lock().take() {
            if self.logged_in.swap(false, Ordering::AcqRel) {
                let frame = RequestFrame::new(Command::LogoutUser.code(), Bytes::new()).encode();
                if let Err(e) = exchange(&mut stream, &frame) {
                    tracing::debug!("Logout before close failed: {}", e);
                }
            }
            tracing::debug!("Closing connection to {}", self.config.addr);
            let _ = stream.shutdown(std::net::Shutdown::Both);
        }
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }
}

impl Transport for TcpTransport {
    fn send(&self, command: u32, payload: Bytes) -> Result<Bytes, TransportError> {
        let mut guard = self.stream.lock();
        let stream = guard.as_mut().ok_or(TransportError::NotConnected)?;

        let frame = RequestFrame::new(command, payload).encode();
        tracing::debug!(
            "Sending {} ({} bytes)",
            command_name(command),
            frame.len()
        );

        let result = exchange(stream, &frame);
        if let Err(ref err) = result {
            // The socket may be mid-frame; it cannot be reused.
            if !matches!(err, TransportError::Status(_)) {
                tracing::debug!("Dropping connection after error: {}", err);
                guard.take();
            }
        }
        result
    }
}

impl Drop for TcpTransport {
    fn drop(&mut self) {
        self.close();
    }
}

fn exchange(stream: &mut TcpStream, frame: &[u8]) -> Result<Bytes, TransportError> {
    stream.write_all(frame).map_err(map_io_error)?;

    let mut raw = [0u8; RESPONSE_HEADER_SIZE];
    stream.read_exact(&mut raw).map_err(map_io_error)?;
    let header =
        ResponseHeader::decode(&raw).map_err(|e| TransportError::Protocol(e.to_string()))?;

    let mut body = vec![0u8; header.length as usize];
    stream.read_exact(&mut body).map_err(map_io_error)?;

    if !header.status.is_ok() {
        tracing::debug!("Broker returned {}", header.status);
        return Err(TransportError::Status(header.status));
    }

    tracing::debug!("Received response ({} bytes)", body.len());
    Ok(Bytes::from(body))
}

fn map_io_error(err: std::io::Error) -> TransportError {
    match err.kind() {
        ErrorKind::UnexpectedEof | ErrorKind::ConnectionReset | ErrorKind::BrokenPipe => {
            TransportError::ConnectionClosed
        }
        ErrorKind::TimedOut | ErrorKind::WouldBlock => TransportError::Timeout,
        _ => TransportError::Io(err),
    }
}
