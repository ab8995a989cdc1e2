// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Wakes blocked waiters when the connection manager is torn down.

use std::sync::{Condvar, Mutex};
use std::time::Duration;

/// Termination flag plus a condition variable broadcast on termination.
#[derive(Debug, Default)]
pub struct ShutdownCoordinator {
    terminated: Mutex<bool>,
    condvar: Condvar,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the termination flag and wakes every waiter.
    ///
    /// Returns true on the first call only.
    pub fn terminate(&self) -> bool {
        let first = {
            let mut terminated = self.terminated.lock().unwrap_or_else(|e| e.into_inner());
            let first = !*terminated;
            *terminated = true;
            first
        };
        self.condvar.notify_all();
        first
    }

    /// Returns true once [`terminate`](ShutdownCoordinator::terminate) has run.
    pub fn is_terminated(&self) -> bool {
        *self.terminated.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Blocks until terminated or until `timeout` elapses.
    ///
    /// Returns true if terminated.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let terminated = self.terminated.lock().unwrap_or_else(|e| e.into_inner());
        let (terminated, _) = self
            .condvar
            .wait_timeout_while(terminated, timeout, |terminated| !*terminated)
            .unwrap_or_else(|e| e.into_inner());
        *terminated
    }
}

#[cfg(test)]
#[path = "shutdown_tests.rs"]
mod tests;
