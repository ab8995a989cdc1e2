// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transport abstraction for posting to the sync server.
//!
//! Provides a trait-based transport layer that enables:
//! - Real HTTP connections for production ([`HttpTransport`](crate::HttpTransport))
//! - Mock transports for unit testing
//!
//! Calls are blocking. A transport must tolerate `kill` and `reset` being
//! called from any thread while another thread is inside `post`.

use std::fmt;
use std::io::Read;

/// Error type for transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connection failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The URL could not be built.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The transport was killed.
    #[error("transport killed")]
    Killed,

    /// The transport could not be set up.
    #[error("transport setup failed: {0}")]
    Setup(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// One outgoing POST.
#[derive(Debug, Clone, Copy)]
pub struct PostRequest<'a> {
    /// Full URL, without port.
    pub url: &'a str,
    /// Port to connect to.
    pub port: u16,
    /// Credential; empty for unauthenticated requests.
    pub auth_token: &'a str,
    pub body: &'a [u8],
}

/// Response head plus a blocking reader over the body.
pub struct Reply {
    pub code: u16,
    /// Declared content length, if the server sent one.
    pub content_length: Option<u64>,
    pub body: Box<dyn Read + Send>,
}

impl fmt::Debug for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reply")
            .field("code", &self.code)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

/// Platform transport used by the connection manager.
pub trait Transport: Send + Sync {
    /// Sends one POST and returns once the response head has arrived.
    fn post(&self, request: &PostRequest<'_>) -> TransportResult<Reply>;

    /// Aborts in-flight I/O. Later posts fail with [`TransportError::Killed`].
    fn kill(&self);

    /// Drops pooled connections so the next post opens a fresh one.
    fn reset(&self);
}

/// Transport for platforms without any network stack.
///
/// Every post fails; `kill` and `reset` are no-ops.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTransport;

impl Transport for NullTransport {
    fn post(&self, _request: &PostRequest<'_>) -> TransportResult<Reply> {
        Err(TransportError::ConnectionFailed("no transport configured".to_string()))
    }

    fn kill(&self) {}

    fn reset(&self) {}
}
