// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tether-client: Connection manager for a remote sync server.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐     ┌─────────────────┐     ┌─────────────┐
//! │ ServerConnection     │────►│ PostTransaction │────►│  Transport  │────► sync server
//! │ Manager              │     └─────────────────┘     │   (trait)   │
//! │  status, epoch,      │     ┌─────────────────┐     └─────────────┘
//! │  error count         │◄────│  StatusWatcher  │
//! └──────────────────────┘     └─────────────────┘
//!        │            │
//!        ▼            ▼
//! ┌─────────────┐ ┌──────────────────────┐
//! │ EventChannel│ │ ShutdownCoordinator  │
//! │ (listeners) │ │ (kill / wait)        │
//! └─────────────┘ └──────────────────────┘
//! ```
//!
//! # Features
//!
//! - Authenticated posts with cached or explicit credentials
//! - Reachability probing through the server's time-of-day endpoint
//! - Status-change notifications, debounced per request
//! - Connection reset after repeated failures
//! - Cooperative cancellation on kill
//! - Injectable transport trait for testing

mod config;
mod error;
mod http;
mod manager;
mod post;
mod shutdown;
mod transport;
mod watcher;

pub use config::{ManagerConfig, MAX_CONNECTION_ERRORS_BEFORE_RESET};
pub use error::{Error, Result};
pub use http::{HttpOptions, HttpTransport};
pub use manager::{
    parse_server_time, PostBufferParams, ServerConnectionManager, MAX_TIME_CHECK_ATTEMPTS,
};
pub use post::PostTransaction;
pub use shutdown::ShutdownCoordinator;
pub use transport::{NullTransport, PostRequest, Reply, Transport, TransportError, TransportResult};
pub use watcher::StatusWatcher;

#[cfg(test)]
mod test_helpers;
