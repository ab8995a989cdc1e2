// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tether-core: Shared types for the tether sync connection manager
//!
//! This crate provides the status model, connection parameters, URL
//! construction, and the event channel used by `tether-client` and the
//! `tether` CLI.

pub mod channel;
pub mod error;
pub mod event;
pub mod params;
pub mod share;
pub mod status;
pub mod url;

pub use channel::{EventChannel, ListenerId};
pub use error::{Error, Result};
pub use event::{EventKind, ServerConnectionEvent};
pub use params::ConnectionParameters;
pub use share::{fill_message_with_share_details, DirectoryLookup, ShareDetails};
pub use status::{HttpResponse, ServerStatus, RC_FORBIDDEN, RC_REQUEST_OK, RC_UNAUTHORIZED};
