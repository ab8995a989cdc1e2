// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Populates outgoing sync messages with share details.

use serde::{Deserialize, Serialize};

/// Looks up per-share directory state.
pub trait DirectoryLookup {
    /// Returns the store birthday recorded for `share`.
    ///
    /// The outer `None` means the share has no open directory; the inner
    /// `None` means the directory exists but has never been synced.
    fn store_birthday(&self, share: &str) -> Option<Option<String>>;
}

/// The share-identifying header of a client-to-server sync message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_birthday: Option<String>,
    pub share: String,
}

/// Fills `msg` with the birthday and name of `share`.
///
/// Returns false, leaving `msg` untouched, when the directory lookup misses.
pub fn fill_message_with_share_details(
    msg: &mut ShareDetails,
    lookup: &dyn DirectoryLookup,
    share: &str,
) -> bool {
    let Some(birthday) = lookup.store_birthday(share) else {
        tracing::info!("directory lookup failed for share {}", share);
        return false;
    };
    if let Some(birthday) = birthday.filter(|b| !b.is_empty()) {
        msg.store_birthday = Some(birthday);
    }
    msg.share = share.to_string();
    true
}

#[cfg(test)]
#[path = "share_tests.rs"]
mod tests;
