// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod post;
pub mod reachable;
pub mod time;
pub mod watch;

use tether_client::{ManagerConfig, ServerConnectionManager};

use crate::error::Result;

/// Opens a connection manager for `config`.
pub(crate) fn connect(config: ManagerConfig) -> Result<ServerConnectionManager> {
    tracing::debug!("connecting to {}", config.server);
    Ok(ServerConnectionManager::new(config)?)
}
