// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use thiserror::Error;

use tether_core::ServerStatus;

/// All possible errors that can occur in the tether CLI.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("config file not found: {}\n  hint: pass --config or set TETHER_CONFIG to an existing file", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("config error: {0}")]
    Config(String),

    #[error("{0}")]
    Address(#[from] tether_core::Error),

    #[error("{source}\n  server status: {status}")]
    Request {
        status: ServerStatus,
        #[source]
        source: tether_client::Error,
    },

    #[error("server is not reachable")]
    Unreachable,

    #[error("client error: {0}")]
    Client(#[from] tether_client::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for tether CLI operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
