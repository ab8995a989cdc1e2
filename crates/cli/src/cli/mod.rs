// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tether_core::ConnectionParameters;

/// Parse a `[http://|https://]host[:port][/prefix]` server address.
fn parse_server(s: &str) -> Result<ConnectionParameters, String> {
    s.parse().map_err(|e: tether_core::Error| e.to_string())
}

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "tether")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Talk to a sync server: check its clock, probe it, post to it, watch it")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Connection options shared by every command.
#[derive(Args, Clone, Debug, Default)]
pub struct GlobalArgs {
    /// Config file (default: $TETHER_CONFIG, then <config dir>/tether/config.toml)
    #[arg(long, global = true, value_name = "path")]
    pub config: Option<PathBuf>,

    /// Server address, as [http://|https://]host[:port][/prefix]
    #[arg(long, global = true, value_name = "url", value_parser = parse_server)]
    pub server: Option<ConnectionParameters>,

    /// Server host, optionally followed by a path prefix
    #[arg(long, global = true, value_parser = non_empty_string)]
    pub host: Option<String>,

    /// Server port
    #[arg(long, short, global = true)]
    pub port: Option<u16>,

    /// Use TLS
    #[arg(long, global = true, overrides_with = "no_ssl")]
    pub ssl: bool,

    /// Use plain HTTP
    #[arg(long, global = true, overrides_with = "ssl")]
    pub no_ssl: bool,

    /// Client identifier sent with sync commands (default: $TETHER_CLIENT_ID)
    #[arg(long, global = true, value_parser = non_empty_string)]
    pub client_id: Option<String>,

    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    /// The TLS choice made on the command line, if any.
    pub fn use_ssl(&self) -> Option<bool> {
        match (self.ssl, self.no_ssl) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the server's time of day
    Time {
        /// Output format
        #[arg(long, short, value_enum, default_value_t)]
        output: OutputFormat,
    },

    /// Check whether the server answers (exit 1 when it does not)
    Reachable,

    /// Post a request body to the sync server and print the response body
    #[command(after_help = "\
Examples:
  tether post request.bin                Post a file with the cached token
  tether post < request.bin              Post stdin
  tether post req.bin --auth-token T     Post with an explicit token
  tether post req.bin --path /admin/     Post to another endpoint")]
    Post {
        /// File to post ('-' or omitted for stdin)
        file: Option<PathBuf>,

        /// Endpoint path (default: the sync command path with client query)
        #[arg(long, value_parser = non_empty_string)]
        path: Option<String>,

        /// Credential for this request only (default: $TETHER_AUTH_TOKEN or config)
        #[arg(long, value_name = "token")]
        auth_token: Option<String>,
    },

    /// Re-check reachability periodically and print every status change
    Watch {
        /// Seconds between checks
        #[arg(long, short, default_value_t = 30, value_name = "secs")]
        interval: u64,

        /// Stop after this many checks
        #[arg(long, short = 'n', value_parser = clap::value_parser!(u64).range(1..))]
        count: Option<u64>,

        /// Output format
        #[arg(long, short, value_enum, default_value_t)]
        output: OutputFormat,
    },
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
