// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    transport = { Error::Transport(TransportError::ConnectionFailed("refused".into())), "refused" },
    protocol = { Error::Protocol { code: 502 }, "502" },
    short_read = { Error::ShortRead { expected: 10, actual: 4 }, "declared 10 bytes but sent 4" },
    parse = { Error::Parse("12a".into()), "12a" },
    auth = { Error::Auth(ServerStatus::SyncAuthError), "sync_auth_error" },
    killed = { Error::Killed, "shut down" },
    time_check = { Error::TimeCheckFailed { attempts: 3, reason: "refused".into() }, "3 attempt(s)" },
)]
fn error_display_contains(err: Error, expected: &str) {
    assert!(err.to_string().contains(expected), "{}", err);
}

#[test]
fn transport_error_converts() {
    let err: Error = TransportError::Killed.into();
    assert!(matches!(err, Error::Transport(TransportError::Killed)));
}
