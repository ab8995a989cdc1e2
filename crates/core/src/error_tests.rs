// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    invalid_status = { Error::InvalidStatus("bogus".into()), "bogus" },
    invalid_server = { Error::InvalidServer("ftp://x".into()), "ftp://x" },
    invalid_port = { Error::InvalidPort("99999".into()), "99999" },
)]
fn error_display_contains(err: Error, expected: &str) {
    assert!(err.to_string().contains(expected));
}

#[test]
fn invalid_status_lists_valid_values() {
    let msg = Error::InvalidStatus("x".into()).to_string();
    assert!(msg.contains("hint:"));
    assert!(msg.contains("sync_auth_error"));
}
