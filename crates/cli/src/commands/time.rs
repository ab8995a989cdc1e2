// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use tether_client::ManagerConfig;

use crate::cli::OutputFormat;
use crate::error::{Error, Result};

use super::connect;

/// Prints the server's time of day.
pub fn run(config: ManagerConfig, output: OutputFormat) -> Result<()> {
    let manager = connect(config)?;
    let time = manager
        .check_time()
        .map_err(|source| Error::Request { status: manager.server_status(), source })?;
    println!("{}", format_time(time, output)?);
    Ok(())
}

pub(crate) fn format_time(time: i64, output: OutputFormat) -> Result<String> {
    Ok(match output {
        OutputFormat::Text => time.to_string(),
        OutputFormat::Json => serde_json::to_string(&serde_json::json!({ "time": time }))?,
    })
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod tests;
