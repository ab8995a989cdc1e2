// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Server status classification and the per-request response record.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// HTTP code for a successful request.
pub const RC_REQUEST_OK: u16 = 200;
/// HTTP code returned when credentials are missing or stale.
pub const RC_UNAUTHORIZED: u16 = 401;
/// HTTP code returned when credentials are valid but not permitted.
pub const RC_FORBIDDEN: u16 = 403;

/// Coarse classification of the last observed server interaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerStatus {
    /// Nothing observed yet, or the status was explicitly reset.
    #[default]
    None,
    /// The server could not be contacted at all.
    Unavailable,
    /// The exchange started but the response body was truncated or unreadable.
    IoError,
    /// The server answered with a non-OK response code.
    SyncServerError,
    /// The server rejected our credentials.
    SyncAuthError,
    /// Last exchange completed successfully.
    Ok,
    /// The server asked us to try again later.
    Retry,
}

impl ServerStatus {
    /// Returns the string representation used in logs and output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerStatus::None => "none",
            ServerStatus::Unavailable => "unavailable",
            ServerStatus::IoError => "io_error",
            ServerStatus::SyncServerError => "sync_server_error",
            ServerStatus::SyncAuthError => "sync_auth_error",
            ServerStatus::Ok => "ok",
            ServerStatus::Retry => "retry",
        }
    }

    /// Returns true if the server gave a well-formed, authenticated answer.
    pub fn is_good_reply(&self) -> bool {
        matches!(self, ServerStatus::Ok | ServerStatus::Retry)
    }

    /// Infers the status implied by a raw HTTP response code.
    ///
    /// Returns `None` for [`RC_REQUEST_OK`]: a 200 alone says nothing until
    /// the body has been read.
    pub fn from_response_code(code: u16) -> Option<ServerStatus> {
        match code {
            RC_REQUEST_OK => None,
            RC_UNAUTHORIZED | RC_FORBIDDEN => Some(ServerStatus::SyncAuthError),
            _ => Some(ServerStatus::SyncServerError),
        }
    }
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ServerStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(ServerStatus::None),
            "unavailable" => Ok(ServerStatus::Unavailable),
            "io_error" => Ok(ServerStatus::IoError),
            "sync_server_error" => Ok(ServerStatus::SyncServerError),
            "sync_auth_error" => Ok(ServerStatus::SyncAuthError),
            "ok" => Ok(ServerStatus::Ok),
            "retry" => Ok(ServerStatus::Retry),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

/// Outcome of a single request/response exchange.
///
/// Created fresh for every transaction and never shared between two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpResponse {
    /// HTTP response code; meaningless when the exchange failed.
    pub response_code: u16,
    /// Declared body length, or -1 when the server did not declare one.
    pub content_length: i64,
    /// Status inferred from this exchange.
    pub server_status: ServerStatus,
    /// Whether this exchange proved the server reachable.
    pub reachable: bool,
}

impl Default for HttpResponse {
    fn default() -> Self {
        HttpResponse {
            response_code: 0,
            content_length: -1,
            server_status: ServerStatus::None,
            reachable: false,
        }
    }
}

impl HttpResponse {
    /// Returns true if the server answered with [`RC_REQUEST_OK`].
    pub fn is_request_ok(&self) -> bool {
        self.response_code == RC_REQUEST_OK
    }
}

impl fmt::Display for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "response code {} (bogus on error), content length {} (bogus on error), server status {}",
            self.response_code, self.content_length, self.server_status
        )
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
