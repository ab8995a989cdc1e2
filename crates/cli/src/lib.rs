// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tether_cli - command line front end for the sync server connection manager.
//!
//! # Main Components
//!
//! - [`Cli`] - Argument parsing
//! - [`config`] - Config file lookup and command-line overrides
//! - [`Error`] - Error types for all commands
//!
//! Every command builds a [`ServerConnectionManager`](tether_client::ServerConnectionManager)
//! from the resolved [`ManagerConfig`] and drives one of its operations.

mod cli;
mod commands;
mod logging;

pub mod config;
pub mod env;
pub mod error;

pub use cli::{Cli, Command, GlobalArgs, OutputFormat};
pub use error::{Error, Result};

use std::time::Duration;

use tether_client::ManagerConfig;

use crate::config::Overrides;

/// Runs a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.global.verbose);
    let config = resolve_config(&cli.global)?;

    match cli.command {
        Command::Time { output } => commands::time::run(config, output),
        Command::Reachable => commands::reachable::run(config),
        Command::Post { file, path, auth_token } => {
            commands::post::run(config, file.as_deref(), path.as_deref(), auth_token.as_deref())
        }
        Command::Watch { interval, count, output } => {
            commands::watch::run(config, Duration::from_secs(interval), count, output)
        }
    }
}

/// Loads the config file and applies command-line and environment overrides.
///
/// Command-line flags win over environment variables, which win over the file.
pub fn resolve_config(args: &GlobalArgs) -> Result<ManagerConfig> {
    let source =
        config::locate(args.config.clone(), env::config_path(), config::default_config_path());
    let mut config = config::load(&source)?;

    let overrides = Overrides {
        server: args.server.clone(),
        host: args.host.clone(),
        port: args.port,
        use_ssl: args.use_ssl(),
        client_id: args.client_id.clone().or_else(env::client_id),
        auth_token: env::auth_token(),
    };
    overrides.apply(&mut config);
    Ok(config)
}
