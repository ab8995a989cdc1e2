// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Server connection parameters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

const HTTP_PORT: u16 = 80;
const HTTPS_PORT: u16 = 443;

/// Where the sync server lives and how to talk to it.
///
/// `host` may carry a path prefix (e.g. `sync.example.com/api/`); the
/// trailing slash is stripped when URLs are built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionParameters {
    /// Server host, optionally followed by a path prefix.
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Use TLS (`https://`).
    #[serde(default)]
    pub use_ssl: bool,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    HTTP_PORT
}

impl Default for ConnectionParameters {
    fn default() -> Self {
        ConnectionParameters { host: default_host(), port: default_port(), use_ssl: false }
    }
}

impl ConnectionParameters {
    /// Creates parameters from their parts.
    pub fn new(host: impl Into<String>, port: u16, use_ssl: bool) -> Self {
        ConnectionParameters { host: host.into(), port, use_ssl }
    }

    /// Returns the URL scheme implied by `use_ssl`.
    pub fn scheme(&self) -> &'static str {
        if self.use_ssl {
            "https"
        } else {
            "http"
        }
    }
}

impl fmt::Display for ConnectionParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (authority, path) = split_authority(&self.host);
        write!(f, "{}://{}:{}{}", self.scheme(), authority, self.port, path)
    }
}

/// Parses `[http://|https://]host[:port][/prefix]`.
///
/// Without a scheme, plain HTTP is assumed. Without a port, the scheme's
/// default port is used.
impl FromStr for ConnectionParameters {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let (use_ssl, rest) = if let Some(rest) = trimmed.strip_prefix("https://") {
            (true, rest)
        } else if let Some(rest) = trimmed.strip_prefix("http://") {
            (false, rest)
        } else if trimmed.contains("://") {
            return Err(Error::InvalidServer(s.to_string()));
        } else {
            (false, trimmed)
        };

        let (authority, path) = split_authority(rest);
        let (host, port) = match authority.rsplit_once(':') {
            Some((host, port)) => {
                let port = port.parse::<u16>().map_err(|_| Error::InvalidPort(port.to_string()))?;
                (host, port)
            }
            None => (authority, if use_ssl { HTTPS_PORT } else { HTTP_PORT }),
        };

        if host.is_empty() {
            return Err(Error::InvalidServer(s.to_string()));
        }

        Ok(ConnectionParameters { host: format!("{}{}", host, path), port, use_ssl })
    }
}

fn split_authority(host: &str) -> (&str, &str) {
    match host.find('/') {
        Some(idx) => host.split_at(idx),
        None => (host, ""),
    }
}

#[cfg(test)]
#[path = "params_tests.rs"]
mod tests;
