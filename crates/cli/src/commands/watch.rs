// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use tracing::{debug, warn};

use tether_client::ManagerConfig;
use tether_core::{EventKind, ServerConnectionEvent};

use crate::cli::OutputFormat;
use crate::error::Result;

use super::connect;

/// Re-checks reachability every `interval`, printing each status change.
///
/// Runs until `count` checks were made, or forever without a count.
pub fn run(
    config: ManagerConfig,
    interval: Duration,
    count: Option<u64>,
    output: OutputFormat,
) -> Result<()> {
    let manager = connect(config)?;
    manager.channel().add_listener(move |event| match format_event(event, output) {
        Ok(line) => println!("{}", line),
        Err(e) => warn!("cannot format event: {}", e),
    });

    let mut checks = 0;
    loop {
        let reachable = manager.check_server_reachable();
        checks += 1;
        debug!("check {}: reachable={}", checks, reachable);

        if count.is_some_and(|n| checks >= n) || manager.wait_for_shutdown(interval) {
            break;
        }
    }
    Ok(())
}

pub(crate) fn format_event(event: &ServerConnectionEvent, output: OutputFormat) -> Result<String> {
    Ok(match output {
        OutputFormat::Text => {
            let kind = match event.kind {
                EventKind::StatusChanged => "status_changed",
                EventKind::Shutdown => "shutdown",
            };
            format!("{} status={} reachable={}", kind, event.status, event.reachable)
        }
        OutputFormat::Json => serde_json::to_string(event)?,
    })
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
