// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! A single POST exchange with the sync server.

use std::io::{ErrorKind, Read};

use tracing::{debug, error, warn};

use tether_core::url::make_connection_url;
use tether_core::{ConnectionParameters, HttpResponse, ServerStatus};

use crate::error::{Error, Result};
use crate::shutdown::ShutdownCoordinator;
use crate::transport::{PostRequest, Reply, Transport, TransportError};

const READ_CHUNK: usize = 8 * 1024;

/// One request/response exchange.
///
/// Bound to a snapshot of the connection parameters taken when it was made,
/// so a concurrent parameter change never splits a request across servers.
pub struct PostTransaction<'a, T: Transport + ?Sized> {
    transport: &'a T,
    params: ConnectionParameters,
    shutdown: &'a ShutdownCoordinator,
    reply: Option<Reply>,
}

impl<'a, T: Transport + ?Sized> PostTransaction<'a, T> {
    pub fn new(
        transport: &'a T,
        params: ConnectionParameters,
        shutdown: &'a ShutdownCoordinator,
    ) -> Self {
        PostTransaction { transport, params, shutdown, reply: None }
    }

    /// Full URL for `path` on this transaction's server.
    pub fn make_connection_url(&self, path: &str) -> String {
        make_connection_url(&self.params.host, path, self.params.use_ssl)
    }

    /// Sends `body` to `path` and fills in the response head.
    ///
    /// Succeeds whenever the server answered, whatever the response code;
    /// the code and the status it implies are recorded in `response`.
    pub fn init(
        &mut self,
        path: &str,
        auth_token: &str,
        body: &[u8],
        response: &mut HttpResponse,
    ) -> Result<()> {
        if self.shutdown.is_terminated() {
            response.server_status = ServerStatus::Unavailable;
            return Err(Error::Killed);
        }

        let url = self.make_connection_url(path);
        debug!("posting {} bytes to {}", body.len(), url);

        let request = PostRequest { url: &url, port: self.params.port, auth_token, body };
        let reply = match self.transport.post(&request) {
            Ok(reply) => reply,
            Err(TransportError::Killed) => {
                response.server_status = ServerStatus::Unavailable;
                return Err(Error::Killed);
            }
            Err(e) => {
                response.server_status = ServerStatus::Unavailable;
                return Err(e.into());
            }
        };

        response.response_code = reply.code;
        response.content_length =
            reply.content_length.and_then(|n| i64::try_from(n).ok()).unwrap_or(-1);
        if let Some(status) = ServerStatus::from_response_code(reply.code) {
            response.server_status = status;
        }
        self.reply = Some(reply);
        Ok(())
    }

    /// Reads the body of a sync command response.
    ///
    /// Fails unless the response code is OK, and, when `require_response` is
    /// set, unless the server declared a non-empty body.
    pub fn read_buffer_response(
        &mut self,
        buffer_out: &mut Vec<u8>,
        response: &mut HttpResponse,
        require_response: bool,
    ) -> Result<()> {
        if !response.is_request_ok() {
            response.server_status = ServerStatus::SyncServerError;
            return Err(Error::Protocol { code: response.response_code });
        }

        if require_response && response.content_length < 1 {
            return Err(Error::EmptyResponse);
        }

        self.read_exact_response(buffer_out, response)
    }

    /// Reads a body of any length, including zero.
    pub fn read_download_response(
        &mut self,
        buffer_out: &mut Vec<u8>,
        response: &mut HttpResponse,
    ) -> Result<()> {
        self.read_exact_response(buffer_out, response)
    }

    fn read_exact_response(
        &mut self,
        buffer_out: &mut Vec<u8>,
        response: &mut HttpResponse,
    ) -> Result<()> {
        let expected = response.content_length;
        let actual = match self.read_response(buffer_out, expected) {
            Ok(actual) => actual,
            Err(e) => {
                response.server_status = ServerStatus::IoError;
                return Err(e);
            }
        };

        if i64::try_from(actual).ok() != Some(expected) {
            error!(
                "mismatched content lengths, server claimed {} but sent {}",
                expected, actual
            );
            response.server_status = ServerStatus::IoError;
            return Err(Error::ShortRead { expected, actual });
        }
        Ok(())
    }

    /// Reads up to `length` bytes into `buffer_out`, returning the count.
    ///
    /// Polls the termination flag between chunks.
    fn read_response(&mut self, buffer_out: &mut Vec<u8>, length: i64) -> Result<u64> {
        buffer_out.clear();
        let Some(reply) = self.reply.as_mut() else {
            return Ok(0);
        };
        let Ok(limit) = u64::try_from(length) else {
            return Ok(0);
        };

        let mut chunk = [0u8; READ_CHUNK];
        let mut total: u64 = 0;
        while total < limit {
            if self.shutdown.is_terminated() {
                return Err(Error::Killed);
            }
            let want = usize::try_from(limit - total).map_or(READ_CHUNK, |n| n.min(READ_CHUNK));
            match reply.body.read(&mut chunk[..want]) {
                Ok(0) => break,
                Ok(n) => {
                    buffer_out.extend_from_slice(&chunk[..n]);
                    total += n as u64;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    if self.shutdown.is_terminated() {
                        return Err(Error::Killed);
                    }
                    warn!("response body read failed: {}", e);
                    break;
                }
            }
        }
        Ok(total)
    }
}
