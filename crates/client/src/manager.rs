// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Connection manager for the sync server.
//!
//! Provides a high-level interface for:
//! - Posting sync commands with cached or explicit credentials
//! - Probing reachability through the time-of-day endpoint
//! - Tracking server status and notifying listeners of changes
//! - Resetting connections after repeated failures
//!
//! Each piece of shared state has its own guard; no lock is ever held across
//! a network call or a listener callback.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, RwLock};
use std::time::Duration;

use tracing::{error, info, warn};

use tether_core::url::{make_sync_query_string, make_sync_server_path, GET_TIME_POST_BODY};
use tether_core::{
    ConnectionParameters, EventChannel, HttpResponse, ServerConnectionEvent, ServerStatus,
    RC_REQUEST_OK,
};

use crate::config::ManagerConfig;
use crate::error::{Error, Result};
use crate::http::HttpTransport;
use crate::post::PostTransaction;
use crate::shutdown::ShutdownCoordinator;
use crate::transport::Transport;
use crate::watcher::StatusWatcher;

/// Time-check attempts made while connection resets keep interrupting.
pub const MAX_TIME_CHECK_ATTEMPTS: u32 = 3;

/// Input and output of a sync command post.
#[derive(Debug, Default)]
pub struct PostBufferParams<'a> {
    pub buffer_in: &'a [u8],
    /// Response body, filled on success.
    pub buffer_out: Vec<u8>,
    /// Response head and inferred status, filled on success and failure.
    pub response: HttpResponse,
}

impl<'a> PostBufferParams<'a> {
    pub fn new(buffer_in: &'a [u8]) -> Self {
        PostBufferParams { buffer_in, ..Default::default() }
    }
}

/// Maintains a session against the sync server.
pub struct ServerConnectionManager<T: Transport = HttpTransport> {
    transport: T,
    params: Mutex<ConnectionParameters>,
    auth_token: RwLock<String>,
    client_id: RwLock<String>,
    sync_path: String,
    time_path: String,
    auto_reset_on_error_threshold: bool,
    max_errors_before_reset: u32,
    server_status: Mutex<ServerStatus>,
    server_reachable: AtomicBool,
    reset_count: AtomicU64,
    error_count: Mutex<u32>,
    shutdown: ShutdownCoordinator,
    channel: EventChannel<ServerConnectionEvent>,
}

impl ServerConnectionManager<HttpTransport> {
    /// Create a new manager talking HTTP.
    pub fn new(config: ManagerConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.http_options())?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> ServerConnectionManager<T> {
    /// Create a new manager with a custom transport.
    pub fn with_transport(config: ManagerConfig, transport: T) -> Self {
        ServerConnectionManager {
            transport,
            params: Mutex::new(config.server),
            auth_token: RwLock::new(config.auth_token),
            client_id: RwLock::new(config.client_id),
            sync_path: config.sync_path,
            time_path: config.time_path,
            auto_reset_on_error_threshold: config.auto_reset_on_error_threshold,
            max_errors_before_reset: config.max_errors_before_reset,
            server_status: Mutex::new(ServerStatus::None),
            server_reachable: AtomicBool::new(false),
            reset_count: AtomicU64::new(0),
            error_count: Mutex::new(0),
            shutdown: ShutdownCoordinator::new(),
            channel: EventChannel::new(ServerConnectionEvent::shutdown()),
        }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Channel on which status changes are announced.
    pub fn channel(&self) -> &EventChannel<ServerConnectionEvent> {
        &self.channel
    }

    pub fn server_status(&self) -> ServerStatus {
        *self.server_status.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Result of the last reachability probe or successful post.
    pub fn server_reachable(&self) -> bool {
        self.server_reachable.load(Ordering::SeqCst)
    }

    /// Number of connection resets so far.
    pub fn reset_count(&self) -> u64 {
        self.reset_count.load(Ordering::Acquire)
    }

    /// Consecutive errors counted towards the reset threshold.
    pub fn error_count(&self) -> u32 {
        *self.error_count.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn auth_token(&self) -> String {
        self.auth_token.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Replaces the cached credential.
    pub fn set_auth_token(&self, auth_token: impl Into<String>) {
        *self.auth_token.write().unwrap_or_else(|e| e.into_inner()) = auth_token.into();
    }

    pub fn client_id(&self) -> String {
        self.client_id.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn set_client_id(&self, client_id: impl Into<String>) {
        *self.client_id.write().unwrap_or_else(|e| e.into_inner()) = client_id.into();
    }

    /// Path of the sync command endpoint, including this client's query string.
    pub fn sync_server_path(&self) -> String {
        make_sync_server_path(&self.sync_path, &make_sync_query_string(&self.client_id()))
    }

    /// Posts to the sync command endpoint using the cached credential.
    pub fn post_buffer_with_cached_auth(&self, params: &mut PostBufferParams<'_>) -> Result<()> {
        let path = self.sync_server_path();
        let auth_token = self.auth_token();
        self.post_buffer_to_path(params, &path, &auth_token)
    }

    /// Posts to the sync command endpoint with an explicit credential.
    ///
    /// The cached credential is left untouched.
    pub fn post_buffer_with_auth(
        &self,
        params: &mut PostBufferParams<'_>,
        auth_token: &str,
    ) -> Result<()> {
        let path = self.sync_server_path();
        self.post_buffer_to_path(params, &path, auth_token)
    }

    /// Posts `params.buffer_in` to `path` and reads the response body.
    ///
    /// A failed exchange or a non-OK response code counts towards the error
    /// threshold. A successful read marks the server reachable.
    pub fn post_buffer_to_path(
        &self,
        params: &mut PostBufferParams<'_>,
        path: &str,
        auth_token: &str,
    ) -> Result<()> {
        let PostBufferParams { buffer_in, buffer_out, response } = params;
        let mut watcher = StatusWatcher::new(self, response);
        let mut post = self.make_post();

        if let Err(e) = post.init(path, auth_token, *buffer_in, watcher.response()) {
            self.increment_error_count();
            return Err(e);
        }

        let code = watcher.response().response_code;
        if code != RC_REQUEST_OK {
            let status = watcher.response().server_status;
            self.increment_error_count();
            return Err(if status == ServerStatus::SyncAuthError {
                Error::Auth(status)
            } else {
                Error::Protocol { code }
            });
        }

        post.read_buffer_response(buffer_out, watcher.response(), true)?;

        let response = watcher.response();
        response.server_status = ServerStatus::Ok;
        response.reachable = true;
        self.set_server_reachable(true);
        Ok(())
    }

    /// Asks the server for its time of day.
    ///
    /// Only retries when a connection reset happened during the previous
    /// attempt, at most [`MAX_TIME_CHECK_ATTEMPTS`] times in total. Ordinary
    /// failures are not retried.
    pub fn check_time(&self) -> Result<i64> {
        let mut response = HttpResponse::default();
        let mut watcher = StatusWatcher::new(self, &mut response);

        let mut attempts = 0;
        let mut last_error = String::new();
        let mut start_reset_count = self.reset_count().wrapping_sub(1);
        while attempts < MAX_TIME_CHECK_ATTEMPTS && start_reset_count != self.reset_count() {
            attempts += 1;
            start_reset_count = self.reset_count();

            match self.get_time(watcher.response()) {
                Ok(time) => {
                    info!("server was reachable");
                    return Ok(time);
                }
                Err(e) => last_error = e.to_string(),
            }
        }

        self.increment_error_count();
        Err(Error::TimeCheckFailed { attempts, reason: last_error })
    }

    fn get_time(&self, response: &mut HttpResponse) -> Result<i64> {
        let mut post = self.make_post();
        info!("requesting get_time from {}", post.make_connection_url(&self.time_path));

        // The time endpoint does not require authentication.
        if let Err(e) = post.init(&self.time_path, "", GET_TIME_POST_BODY.as_bytes(), response) {
            info!("unable to check the time: {}", e);
            return Err(e);
        }

        let mut body = Vec::new();
        post.read_download_response(&mut body, response)?;
        let time = parse_server_time(&body)
            .inspect_err(|e| error!("unable to read the server time: {}", e))?;
        response.reachable = true;
        Ok(time)
    }

    /// Returns true if the time-of-day endpoint answers.
    pub fn is_server_reachable(&self) -> bool {
        self.check_time().is_ok()
    }

    /// Returns true if the stored status is a good reply. Never does I/O.
    pub fn is_user_authenticated(&self) -> bool {
        self.server_status().is_good_reply()
    }

    /// Re-probes reachability, notifying listeners if it changed.
    pub fn check_server_reachable(&self) -> bool {
        let reachable = self.is_server_reachable();
        if self.server_reachable.swap(reachable, Ordering::SeqCst) != reachable {
            self.notify_status_changed();
        }
        reachable
    }

    /// Counts a connection error.
    ///
    /// Past the threshold, the counter restarts from zero and the server is
    /// probed; an unreachable server triggers a connection reset. Returns
    /// false when the threshold was just crossed. A no-op returning true
    /// when auto reset is disabled.
    pub fn increment_error_count(&self) -> bool {
        if !self.auto_reset_on_error_threshold {
            return true;
        }

        {
            let mut count = self.error_count.lock().unwrap_or_else(|e| e.into_inner());
            *count += 1;
            if *count <= self.max_errors_before_reset {
                return true;
            }
            *count = 0;
        }

        // The probe re-enters this method on failure, so the lock must be
        // released first.
        if self.is_server_reachable() {
            warn!("multiple connection failures while server is reachable");
        } else {
            warn!("too many connection failures, server is not reachable; resetting connections");
            self.reset_connection();
        }
        false
    }

    /// Replaces the server parameters and drops pooled connections.
    pub fn set_server_parameters(&self, params: ConnectionParameters) {
        {
            let mut current = self.params.lock().unwrap_or_else(|e| e.into_inner());
            info!("server parameters changed to {}", params);
            *current = params;
        }
        self.transport.reset();
    }

    /// Current server parameters, read as one consistent triple.
    pub fn server_parameters(&self) -> ConnectionParameters {
        self.params.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Resets connections, forgets the status, and notifies listeners.
    pub fn reset_auth_status(&self) {
        self.reset_connection();
        *self.server_status.lock().unwrap_or_else(|e| e.into_inner()) = ServerStatus::None;
        self.notify_status_changed();
    }

    /// Bumps the reset epoch and drops pooled connections.
    ///
    /// In-flight requests started before the reset will not update the status.
    pub fn reset_connection(&self) {
        self.reset_count.fetch_add(1, Ordering::AcqRel);
        self.transport.reset();
    }

    /// Aborts in-flight I/O and wakes every thread waiting for shutdown.
    ///
    /// Safe to call repeatedly and concurrently with posts.
    pub fn kill(&self) {
        if self.shutdown.terminate() {
            info!("connection manager killed");
        }
        self.transport.kill();
    }

    pub fn is_terminated(&self) -> bool {
        self.shutdown.is_terminated()
    }

    /// Sleeps up to `timeout`, waking early on [`kill`](Self::kill).
    ///
    /// Returns true if the manager was killed.
    pub fn wait_for_shutdown(&self, timeout: Duration) -> bool {
        self.shutdown.wait_timeout(timeout)
    }

    /// Announces the current status and reachability to listeners.
    pub fn notify_status_changed(&self) {
        let event =
            ServerConnectionEvent::status_changed(self.server_status(), self.server_reachable());
        self.channel.notify(&event);
    }

    pub(crate) fn set_server_reachable(&self, reachable: bool) {
        self.server_reachable.store(reachable, Ordering::SeqCst);
    }

    /// Stores `status` unless a reset happened since `reset_count` was read.
    ///
    /// Returns true if the stored status changed.
    pub(crate) fn adopt_status(&self, reset_count: u64, status: ServerStatus) -> bool {
        let mut current = self.server_status.lock().unwrap_or_else(|e| e.into_inner());
        if reset_count != self.reset_count() || *current == status {
            return false;
        }
        *current = status;
        true
    }

    fn make_post(&self) -> PostTransaction<'_, T> {
        PostTransaction::new(&self.transport, self.server_parameters(), &self.shutdown)
    }
}

impl<T: Transport> Drop for ServerConnectionManager<T> {
    fn drop(&mut self) {
        self.shutdown.terminate();
        self.channel.shutdown();
    }
}

/// Parses a get_time body. Only ASCII digits are accepted; an empty body is
/// time zero.
pub fn parse_server_time(body: &[u8]) -> Result<i64> {
    let text = String::from_utf8_lossy(body);
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::Parse(text.into_owned()));
    }
    if text.is_empty() {
        return Ok(0);
    }
    text.parse::<i64>().map_err(|_| Error::Parse(text.into_owned()))
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
