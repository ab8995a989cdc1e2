// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Multi-listener event channel.
//!
//! Listeners are plain callbacks. Delivery happens on the notifying thread,
//! outside the channel lock, so a listener may add or remove listeners (or
//! call back into whatever owns the channel) without deadlocking.
//!
//! A listener removed while a notification is in flight may still observe
//! that one event.

use std::fmt;
use std::sync::{Arc, Mutex};

/// Handle returned by [`EventChannel::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback<E> = Arc<dyn Fn(&E) + Send + Sync>;

struct ChannelState<E> {
    next_id: u64,
    listeners: Vec<(ListenerId, Callback<E>)>,
    closed: bool,
}

/// Fan-out of events to registered callbacks.
///
/// Created with the event delivered on [`shutdown`](EventChannel::shutdown);
/// dropping the channel shuts it down.
pub struct EventChannel<E> {
    shutdown_event: E,
    state: Mutex<ChannelState<E>>,
}

impl<E> EventChannel<E> {
    /// Creates an empty channel.
    pub fn new(shutdown_event: E) -> Self {
        EventChannel {
            shutdown_event,
            state: Mutex::new(ChannelState { next_id: 0, listeners: Vec::new(), closed: false }),
        }
    }

    /// Registers a listener and returns its handle.
    ///
    /// Listeners added after shutdown are never called.
    pub fn add_listener<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let id = ListenerId(state.next_id);
        state.next_id += 1;
        if state.closed {
            tracing::debug!("listener {:?} added to a closed channel", id);
        } else {
            state.listeners.push((id, Arc::new(listener)));
        }
        id
    }

    /// Unregisters a listener. Returns false if it was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let before = state.listeners.len();
        state.listeners.retain(|(lid, _)| *lid != id);
        state.listeners.len() != before
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).listeners.len()
    }

    /// Returns true once [`shutdown`](EventChannel::shutdown) has run.
    pub fn is_closed(&self) -> bool {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).closed
    }

    /// Delivers `event` to every listener registered at the time of the call.
    pub fn notify(&self, event: &E) {
        let snapshot: Vec<Callback<E>> = {
            let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            if state.closed {
                return;
            }
            state.listeners.iter().map(|(_, cb)| Arc::clone(cb)).collect()
        };
        for listener in snapshot {
            listener(event);
        }
    }

    /// Delivers the shutdown event once and drops every listener.
    pub fn shutdown(&self) {
        let listeners = {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            if state.closed {
                return;
            }
            state.closed = true;
            std::mem::take(&mut state.listeners)
        };
        for (_, listener) in listeners {
            listener(&self.shutdown_event);
        }
    }
}

impl<E> Drop for EventChannel<E> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl<E> fmt::Debug for EventChannel<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventChannel")
            .field("listeners", &self.listener_count())
            .field("closed", &self.is_closed())
            .finish()
    }
}

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;
