// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use tether_client::ManagerConfig;

use crate::error::{Error, Result};

use super::connect;

/// Prints whether the server answers its time endpoint.
pub fn run(config: ManagerConfig) -> Result<()> {
    let manager = connect(config)?;
    if manager.is_server_reachable() {
        println!("reachable");
        Ok(())
    } else {
        println!("unreachable");
        Err(Error::Unreachable)
    }
}
