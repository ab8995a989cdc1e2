// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for connection manager operations.
//!
//! Every failure also leaves its classification in the request's
//! [`HttpResponse::server_status`](tether_core::HttpResponse), so callers that
//! only care about success can use `is_ok()` and read the status afterwards.

use thiserror::Error;

use tether_core::ServerStatus;

use crate::transport::TransportError;

#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with a non-OK response code.
    #[error("server returned HTTP {code}")]
    Protocol { code: u16 },

    /// The body was shorter than the declared content length.
    #[error("short read: server declared {expected} bytes but sent {actual}")]
    ShortRead { expected: i64, actual: u64 },

    /// A body was required but the server declared none.
    #[error("server sent an empty response")]
    EmptyResponse,

    /// The time endpoint answered with something other than digits.
    #[error("non-numeric response from get_time: '{0}'")]
    Parse(String),

    /// The server rejected the credentials.
    #[error("authentication failed: server status is {0}")]
    Auth(ServerStatus),

    /// The manager was killed while the request was pending.
    #[error("connection manager was shut down")]
    Killed,

    /// No time-check attempt succeeded.
    #[error("time check failed after {attempts} attempt(s): {reason}")]
    TimeCheckFailed { attempts: u32, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
