// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Connection manager configuration for the CLI.
//!
//! The config file is looked up in order:
//! - `--config <path>`
//! - `$TETHER_CONFIG`
//! - `<config dir>/tether/config.toml`
//!
//! A missing default file means built-in defaults; a missing file that was
//! named explicitly is an error. Command-line flags and environment
//! variables are applied on top with [`Overrides`].

use std::fs;
use std::path::{Path, PathBuf};

use tether_client::ManagerConfig;
use tether_core::ConnectionParameters;

use crate::error::{Error, Result};

const CONFIG_DIR_NAME: &str = "tether";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Where the config comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Named by the user; must exist.
    Explicit(PathBuf),
    /// The per-user default location; may be absent.
    Default(PathBuf),
    /// No file at all.
    Builtin,
}

/// Returns `<config dir>/tether/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Picks the config source from the flag, the environment, and the default.
pub fn locate(
    flag: Option<PathBuf>,
    from_env: Option<PathBuf>,
    default: Option<PathBuf>,
) -> ConfigSource {
    match (flag.or(from_env), default) {
        (Some(path), _) => ConfigSource::Explicit(path),
        (None, Some(path)) => ConfigSource::Default(path),
        (None, None) => ConfigSource::Builtin,
    }
}

/// Loads the config from `source`.
pub fn load(source: &ConfigSource) -> Result<ManagerConfig> {
    match source {
        ConfigSource::Explicit(path) if !path.exists() => {
            Err(Error::ConfigNotFound(path.clone()))
        }
        ConfigSource::Explicit(path) => load_file(path),
        ConfigSource::Default(path) if path.exists() => load_file(path),
        ConfigSource::Default(_) | ConfigSource::Builtin => Ok(ManagerConfig::default()),
    }
}

/// Parses a TOML config file.
pub fn load_file(path: &Path) -> Result<ManagerConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;
    let config: ManagerConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {}", path.display(), e)))?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(config)
}

/// Values that take precedence over the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Replaces the whole server triple.
    pub server: Option<ConnectionParameters>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub use_ssl: Option<bool>,
    pub client_id: Option<String>,
    pub auth_token: Option<String>,
}

impl Overrides {
    /// Applies every set override. Individual server fields win over `server`.
    pub fn apply(&self, config: &mut ManagerConfig) {
        if let Some(server) = &self.server {
            config.server = server.clone();
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(use_ssl) = self.use_ssl {
            config.server.use_ssl = use_ssl;
        }
        if let Some(client_id) = &self.client_id {
            config.client_id = client_id.clone();
        }
        if let Some(auth_token) = &self.auth_token {
            config.auth_token = auth_token.clone();
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
