// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Connection manager configuration.
//!
//! Every field has a default, so a config file only needs to name what it
//! changes:
//!
//! ```toml
//! client_id = "laptop-1"
//!
//! [server]
//! host = "sync.example.com"
//! port = 443
//! use_ssl = true
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use tether_core::url::{SYNC_SERVER_GET_TIME_PATH, SYNC_SERVER_SYNC_PATH};
use tether_core::ConnectionParameters;

use crate::http::HttpOptions;

/// Consecutive failures tolerated before the manager probes the server and
/// possibly resets its connections.
pub const MAX_CONNECTION_ERRORS_BEFORE_RESET: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    pub server: ConnectionParameters,
    /// Identifies this client in the sync query string.
    pub client_id: String,
    /// Initial cached credential. Empty means unauthenticated.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub auth_token: String,
    pub user_agent: String,
    pub sync_path: String,
    pub time_path: String,
    /// Probe and reset connections after too many consecutive errors.
    pub auto_reset_on_error_threshold: bool,
    pub max_errors_before_reset: u32,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        let http = HttpOptions::default();
        ManagerConfig {
            server: ConnectionParameters::default(),
            client_id: String::new(),
            auth_token: String::new(),
            user_agent: http.user_agent,
            sync_path: SYNC_SERVER_SYNC_PATH.to_string(),
            time_path: SYNC_SERVER_GET_TIME_PATH.to_string(),
            auto_reset_on_error_threshold: true,
            max_errors_before_reset: MAX_CONNECTION_ERRORS_BEFORE_RESET,
            request_timeout_secs: http.request_timeout.as_secs(),
            connect_timeout_secs: http.connect_timeout.as_secs(),
        }
    }
}

impl ManagerConfig {
    /// Creates a config for the given server with everything else defaulted.
    pub fn new(server: ConnectionParameters, client_id: impl Into<String>) -> Self {
        ManagerConfig { server, client_id: client_id.into(), ..Default::default() }
    }

    /// Transport settings derived from this config.
    pub fn http_options(&self) -> HttpOptions {
        HttpOptions {
            user_agent: self.user_agent.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
