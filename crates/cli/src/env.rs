// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by the CLI are defined here
//! with typed accessor functions. The variable name constants are generated
//! by `build.rs` and live in the [`vars`] submodule.

use std::path::PathBuf;

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

/// Returns the value of `TETHER_CONFIG` if set.
pub fn config_path() -> Option<PathBuf> {
    std::env::var(vars::TETHER_CONFIG).ok().map(PathBuf::from)
}

/// Returns the value of `TETHER_AUTH_TOKEN` if set and non-empty.
pub fn auth_token() -> Option<String> {
    non_empty(vars::TETHER_AUTH_TOKEN)
}

/// Returns the value of `TETHER_CLIENT_ID` if set and non-empty.
pub fn client_id() -> Option<String> {
    non_empty(vars::TETHER_CLIENT_ID)
}

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
