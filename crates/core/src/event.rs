// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Connection events delivered to listeners.

use serde::{Deserialize, Serialize};

use crate::status::ServerStatus;

/// What happened to the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Stored status or reachability changed.
    StatusChanged,
    /// The connection manager is going away.
    Shutdown,
}

/// A connection state change, as seen by listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConnectionEvent {
    pub kind: EventKind,
    pub status: ServerStatus,
    pub reachable: bool,
}

impl ServerConnectionEvent {
    /// Creates a status-changed event carrying the given snapshot.
    pub fn status_changed(status: ServerStatus, reachable: bool) -> Self {
        ServerConnectionEvent { kind: EventKind::StatusChanged, status, reachable }
    }

    /// The event delivered once when the manager shuts down.
    pub fn shutdown() -> Self {
        ServerConnectionEvent {
            kind: EventKind::Shutdown,
            status: ServerStatus::Unavailable,
            reachable: false,
        }
    }
}
