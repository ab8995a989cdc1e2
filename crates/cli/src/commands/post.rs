// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use tether_client::{ManagerConfig, PostBufferParams};

use crate::error::{Error, Result};

use super::connect;

/// Posts `file` (or stdin) and writes the response body to stdout.
///
/// Without `path`, the body goes to the sync command endpoint. Without
/// `auth_token`, the configured credential is used.
pub fn run(
    config: ManagerConfig,
    file: Option<&Path>,
    path: Option<&str>,
    auth_token: Option<&str>,
) -> Result<()> {
    let body = read_input(file)?;
    let manager = connect(config)?;
    let mut params = PostBufferParams::new(&body);

    let result = match (path, auth_token) {
        (Some(path), Some(token)) => manager.post_buffer_to_path(&mut params, path, token),
        (Some(path), None) => {
            let token = manager.auth_token();
            manager.post_buffer_to_path(&mut params, path, &token)
        }
        (None, Some(token)) => manager.post_buffer_with_auth(&mut params, token),
        (None, None) => manager.post_buffer_with_cached_auth(&mut params),
    };
    result.map_err(|source| Error::Request { status: params.response.server_status, source })?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(&params.buffer_out)?;
    stdout.flush()?;
    Ok(())
}

/// Reads the request body from `file`, or from stdin for `None` or `-`.
pub(crate) fn read_input(file: Option<&Path>) -> Result<Vec<u8>> {
    match file {
        Some(path) if path != Path::new("-") => Ok(fs::read(path)?),
        _ => {
            let mut body = Vec::new();
            io::stdin().lock().read_to_end(&mut body)?;
            Ok(body)
        }
    }
}

#[cfg(test)]
#[path = "post_tests.rs"]
mod tests;
