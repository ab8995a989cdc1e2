// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use yare::parameterized;

#[test]
fn test_time_defaults_to_text() {
    let cli = Cli::try_parse_from(["tether", "time"]).unwrap();
    assert!(matches!(cli.command, Command::Time { output: OutputFormat::Text }));
    assert!(!cli.global.verbose);
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "tether",
        "reachable",
        "--host",
        "sync.example.com",
        "-p",
        "8080",
        "--client-id",
        "laptop",
        "-v",
    ])
    .unwrap();

    assert!(matches!(cli.command, Command::Reachable));
    assert_eq!(cli.global.host.as_deref(), Some("sync.example.com"));
    assert_eq!(cli.global.port, Some(8080));
    assert_eq!(cli.global.client_id.as_deref(), Some("laptop"));
    assert!(cli.global.verbose);
}

#[test]
fn test_server_flag_parses_address() {
    let cli = Cli::try_parse_from(["tether", "--server", "https://sync.example.com", "time"])
        .unwrap();
    assert_eq!(cli.global.server, Some(ConnectionParameters::new("sync.example.com", 443, true)));
}

#[test]
fn test_server_flag_rejects_bad_port() {
    assert!(Cli::try_parse_from(["tether", "--server", "host:notaport", "time"]).is_err());
}

#[parameterized(
    neither = { &[], None },
    ssl = { &["--ssl"], Some(true) },
    no_ssl = { &["--no-ssl"], Some(false) },
    last_wins_plain = { &["--ssl", "--no-ssl"], Some(false) },
    last_wins_tls = { &["--no-ssl", "--ssl"], Some(true) },
)]
fn test_ssl_flags(flags: &[&str], expected: Option<bool>) {
    let mut argv = vec!["tether", "time"];
    argv.extend_from_slice(flags);
    let cli = Cli::try_parse_from(argv).unwrap();
    assert_eq!(cli.global.use_ssl(), expected);
}

#[test]
fn test_post_arguments() {
    let cli = Cli::try_parse_from([
        "tether",
        "post",
        "request.bin",
        "--path",
        "/admin/",
        "--auth-token",
        "secret",
    ])
    .unwrap();

    match cli.command {
        Command::Post { file, path, auth_token } => {
            assert_eq!(file, Some(PathBuf::from("request.bin")));
            assert_eq!(path.as_deref(), Some("/admin/"));
            assert_eq!(auth_token.as_deref(), Some("secret"));
        }
        _ => unreachable!("expected post"),
    }
}

#[test]
fn test_post_reads_stdin_by_default() {
    let cli = Cli::try_parse_from(["tether", "post"]).unwrap();
    assert!(matches!(cli.command, Command::Post { file: None, path: None, auth_token: None }));
}

#[test]
fn test_post_rejects_empty_path() {
    assert!(Cli::try_parse_from(["tether", "post", "--path", " "]).is_err());
}

#[test]
fn test_watch_defaults() {
    let cli = Cli::try_parse_from(["tether", "watch"]).unwrap();
    assert!(matches!(
        cli.command,
        Command::Watch { interval: 30, count: None, output: OutputFormat::Text }
    ));
}

#[test]
fn test_watch_rejects_zero_count() {
    assert!(Cli::try_parse_from(["tether", "watch", "-n", "0"]).is_err());
}

#[test]
fn test_watch_json_output() {
    let cli =
        Cli::try_parse_from(["tether", "watch", "-i", "1", "-n", "2", "-o", "json"]).unwrap();
    assert!(matches!(
        cli.command,
        Command::Watch { interval: 1, count: Some(2), output: OutputFormat::Json }
    ));
}
