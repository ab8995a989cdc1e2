// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for client tests.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use tether_core::{ConnectionParameters, EventKind, ServerConnectionEvent};

use crate::config::ManagerConfig;
use crate::manager::ServerConnectionManager;
use crate::transport_tests::{MockReply, MockTransport};

pub const TEST_HOST: &str = "sync.example.com";
pub const TEST_CLIENT_ID: &str = "client-1";
pub const TEST_TOKEN: &str = "cached-token";

/// Config pointing at [`TEST_HOST`] over plain HTTP.
pub fn test_config() -> ManagerConfig {
    ManagerConfig {
        auth_token: TEST_TOKEN.to_string(),
        ..ManagerConfig::new(ConnectionParameters::new(TEST_HOST, 80, false), TEST_CLIENT_ID)
    }
}

/// Manager over a mock transport scripted with `replies`.
pub fn make_manager(
    replies: impl IntoIterator<Item = MockReply>,
) -> ServerConnectionManager<MockTransport> {
    ServerConnectionManager::with_transport(test_config(), MockTransport::with_replies(replies))
}

/// Records every event the manager announces.
pub fn record_events(
    manager: &ServerConnectionManager<MockTransport>,
) -> Arc<Mutex<Vec<ServerConnectionEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    manager.channel().add_listener(move |e| sink.lock().unwrap().push(*e));
    events
}

/// Status-changed events recorded so far.
pub fn status_events(events: &Mutex<Vec<ServerConnectionEvent>>) -> Vec<ServerConnectionEvent> {
    events.lock().unwrap().iter().filter(|e| e.kind == EventKind::StatusChanged).copied().collect()
}
