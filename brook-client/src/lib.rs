//! # brook-client
//!
//! Client library for brook.
//!
//! This crate provides:
//! - The [`Transport`] abstraction and a blocking TCP implementation
//! - A generic resource adapter, with [`StreamClient`] for stream management
//! - A high-level [`Client`] facade

pub mod adapter;
pub mod client;
pub mod connection;
pub mod error;
pub mod transport;

pub use adapter::{ResourceAdapter, StreamClient};
pub use client::Client;
pub use connection::{ConnectionConfig, Credentials, TcpTransport};
pub use error::{ClientError, TransportError};
pub use transport::Transport;
