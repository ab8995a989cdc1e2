// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scoped reconciliation of per-request status into the manager.

use tether_core::HttpResponse;

use crate::manager::ServerConnectionManager;
use crate::transport::Transport;

/// Snapshots manager state on creation and reconciles it on drop.
///
/// On drop, if no connection reset happened in between:
/// - a response status that differs from the stored one is adopted and
///   listeners are notified;
/// - otherwise, a change in reachability alone notifies listeners.
///
/// A reset in between means the reset already reconciled the status, so
/// nothing is done.
pub struct StatusWatcher<'a, T: Transport> {
    manager: &'a ServerConnectionManager<T>,
    response: &'a mut HttpResponse,
    reset_count: u64,
    server_reachable: bool,
}

impl<'a, T: Transport> StatusWatcher<'a, T> {
    /// Starts watching. `response` is pre-filled with the current status so
    /// an untouched response never counts as a change.
    pub fn new(manager: &'a ServerConnectionManager<T>, response: &'a mut HttpResponse) -> Self {
        let reset_count = manager.reset_count();
        let server_reachable = manager.server_reachable();
        response.server_status = manager.server_status();
        StatusWatcher { manager, response, reset_count, server_reachable }
    }

    /// The response being filled in by the watched request.
    pub fn response(&mut self) -> &mut HttpResponse {
        self.response
    }
}

impl<T: Transport> Drop for StatusWatcher<'_, T> {
    fn drop(&mut self) {
        if self.manager.adopt_status(self.reset_count, self.response.server_status) {
            self.manager.notify_status_changed();
            return;
        }
        if self.reset_count == self.manager.reset_count()
            && self.server_reachable != self.manager.server_reachable()
        {
            self.manager.notify_status_changed();
        }
    }
}
