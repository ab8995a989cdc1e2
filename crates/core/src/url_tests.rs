// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    trailing = { "example.com/", "example.com" },
    no_trailing = { "example.com", "example.com" },
    only_one = { "example.com//", "example.com/" },
    empty = { "", "" },
    lone_slash = { "/", "" },
)]
fn strip_trailing_slash_cases(input: &str, expected: &str) {
    assert_eq!(strip_trailing_slash(input), expected);
}

#[parameterized(
    https = { "sync.example.com", "/command/", true, "https://sync.example.com/command/" },
    http = { "sync.example.com", "/command/", false, "http://sync.example.com/command/" },
    host_with_slash = { "sync.example.com/", "/time", false, "http://sync.example.com/time" },
    host_with_prefix = { "example.com/chrome-sync/", "/command/", true, "https://example.com/chrome-sync/command/" },
)]
fn connection_url(server: &str, path: &str, use_ssl: bool, expected: &str) {
    assert_eq!(make_connection_url(server, path, use_ssl), expected);
}

#[test]
fn sync_query_string_escapes_client_id() {
    assert_eq!(
        make_sync_query_string("abc def&x=1"),
        "client=tether&client_id=abc%20def%26x%3D1"
    );
}

#[test]
fn sync_server_path_joins_with_question_mark() {
    let path = make_sync_server_path(SYNC_SERVER_SYNC_PATH, &make_sync_query_string("id1"));
    assert_eq!(path, "/command/?client=tether&client_id=id1");
}

#[test]
fn well_known_paths() {
    assert_eq!(SYNC_SERVER_SYNC_PATH, "/command/");
    assert_eq!(SYNC_SERVER_GET_TIME_PATH, "/time");
    assert_eq!(GET_TIME_POST_BODY, "command=get_time");
}
