// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for tether-core operations.

use thiserror::Error;

/// All possible errors that can occur in tether-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid server status: '{0}'\n  hint: valid statuses are: none, unavailable, io_error, sync_server_error, sync_auth_error, ok, retry")]
    InvalidStatus(String),

    #[error("invalid server address: '{0}'\n  hint: expected [http://|https://]host[:port]")]
    InvalidServer(String),

    #[error("invalid port: '{0}'")]
    InvalidPort(String),
}

/// A specialized Result type for tether-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
