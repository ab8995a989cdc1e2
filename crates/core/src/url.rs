// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! URL and request path construction for the sync server.

/// Default path of the sync command endpoint.
pub const SYNC_SERVER_SYNC_PATH: &str = "/command/";

/// Default path of the time-of-day endpoint.
///
/// Used to prove the server is really reachable: captive portals answer
/// arbitrary requests with 200 but cannot produce a numeric server time.
pub const SYNC_SERVER_GET_TIME_PATH: &str = "/time";

/// Body posted to the time-of-day endpoint.
pub const GET_TIME_POST_BODY: &str = "command=get_time";

/// Client name reported in the sync query string.
pub const CLIENT_NAME: &str = "tether";

const PARAMETER_CLIENT: &str = "client";
const PARAMETER_CLIENT_ID: &str = "client_id";

/// Removes exactly one trailing `/`, if present.
pub fn strip_trailing_slash(s: &str) -> &str {
    s.strip_suffix('/').unwrap_or(s)
}

/// Builds the full request URL from a server, a path, and the TLS flag.
pub fn make_connection_url(sync_server: &str, path: &str, use_ssl: bool) -> String {
    let scheme = if use_ssl { "https://" } else { "http://" };
    format!("{}{}{}", scheme, strip_trailing_slash(sync_server), path)
}

/// Builds the query string identifying this client to the sync server.
pub fn make_sync_query_string(client_id: &str) -> String {
    format!(
        "{}={}&{}={}",
        PARAMETER_CLIENT,
        urlencoding::encode(CLIENT_NAME),
        PARAMETER_CLIENT_ID,
        urlencoding::encode(client_id)
    )
}

/// Joins a path and a query string.
pub fn make_sync_server_path(path: &str, query_string: &str) -> String {
    format!("{}?{}", path, query_string)
}

#[cfg(test)]
#[path = "url_tests.rs"]
mod tests;
