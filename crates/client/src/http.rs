// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP transport built on reqwest.
//!
//! reqwest is async; this transport owns a small tokio runtime and blocks
//! the calling thread on each request. Every await point races against the
//! kill signal, so `kill()` unblocks callers stuck in a send or body read.

use std::io::{self, Read};
use std::sync::RwLock;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use tokio::runtime::{Handle, Runtime};
use tokio::sync::watch;
use tracing::debug;

use crate::transport::{PostRequest, Reply, Transport, TransportError, TransportResult};

/// Settings for [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub user_agent: String,
    /// Upper bound on a whole request, body included.
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for HttpOptions {
    fn default() -> Self {
        HttpOptions {
            user_agent: concat!("tether/", env!("CARGO_PKG_VERSION")).to_string(),
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Blocking HTTP transport.
pub struct HttpTransport {
    options: HttpOptions,
    client: RwLock<reqwest::Client>,
    handle: Handle,
    /// Held only so it can be shut down without blocking on drop.
    runtime: Option<Runtime>,
    kill_tx: watch::Sender<bool>,
}

impl HttpTransport {
    /// Create a new HTTP transport.
    pub fn new(options: HttpOptions) -> TransportResult<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("tether-http")
            .enable_all()
            .build()?;
        let client = build_client(&options)?;
        let (kill_tx, _) = watch::channel(false);

        Ok(HttpTransport {
            options,
            client: RwLock::new(client),
            handle: runtime.handle().clone(),
            runtime: Some(runtime),
            kill_tx,
        })
    }

    /// Returns true once `kill` has been called.
    pub fn is_killed(&self) -> bool {
        *self.kill_tx.borrow()
    }
}

fn build_client(options: &HttpOptions) -> TransportResult<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(options.user_agent.clone())
        .timeout(options.request_timeout)
        .connect_timeout(options.connect_timeout)
        .build()
        .map_err(|e| TransportError::Setup(e.to_string()))
}

impl Transport for HttpTransport {
    fn post(&self, request: &PostRequest<'_>) -> TransportResult<Reply> {
        if self.is_killed() {
            return Err(TransportError::Killed);
        }

        let mut url = reqwest::Url::parse(request.url)
            .map_err(|e| TransportError::InvalidUrl(format!("{}: {}", request.url, e)))?;
        if request.port != 0 && url.set_port(Some(request.port)).is_err() {
            return Err(TransportError::InvalidUrl(format!(
                "{}: cannot carry port {}",
                request.url, request.port
            )));
        }

        let client = self.client.read().unwrap_or_else(|e| e.into_inner()).clone();
        let mut builder = client
            .post(url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(request.body.to_vec());
        if !request.auth_token.is_empty() {
            builder = builder.bearer_auth(request.auth_token);
        }

        let mut killed = self.kill_tx.subscribe();
        let response = self.handle.block_on(async {
            tokio::select! {
                result = builder.send() => {
                    result.map_err(|e| TransportError::ConnectionFailed(e.to_string()))
                }
                _ = killed.wait_for(|k| *k) => Err(TransportError::Killed),
            }
        })?;

        let code = response.status().as_u16();
        let content_length = response.content_length();
        debug!("HTTP {} from {}, content length {:?}", code, request.url, content_length);

        Ok(Reply {
            code,
            content_length,
            body: Box::new(HttpBody {
                response,
                handle: self.handle.clone(),
                killed,
                pending: Bytes::new(),
            }),
        })
    }

    fn kill(&self) {
        self.kill_tx.send_replace(true);
    }

    fn reset(&self) {
        match build_client(&self.options) {
            Ok(client) => {
                *self.client.write().unwrap_or_else(|e| e.into_inner()) = client;
                debug!("dropped pooled HTTP connections");
            }
            Err(e) => tracing::error!("failed to rebuild HTTP client: {}", e),
        }
    }
}

impl Drop for HttpTransport {
    fn drop(&mut self) {
        self.kill();
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

/// Blocking reader over a streaming response body.
///
/// A body that outlives its transport reads as killed.
struct HttpBody {
    response: reqwest::Response,
    handle: Handle,
    killed: watch::Receiver<bool>,
    pending: Bytes,
}

impl Read for HttpBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        while self.pending.is_empty() {
            let HttpBody { response, handle, killed, .. } = &mut *self;
            let next = handle.block_on(async {
                tokio::select! {
                    chunk = response.chunk() => Some(chunk),
                    _ = killed.wait_for(|k| *k) => None,
                }
            });
            match next {
                Some(Ok(Some(chunk))) => self.pending = chunk,
                Some(Ok(None)) => return Ok(0),
                Some(Err(e)) => return Err(io::Error::other(e)),
                None => {
                    return Err(io::Error::new(io::ErrorKind::ConnectionAborted, "transport killed"))
                }
            }
        }

        let n = buf.len().min(self.pending.len());
        buf[..n].copy_from_slice(&self.pending.split_to(n));
        Ok(n)
    }
}
