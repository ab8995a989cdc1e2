// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;
use common::*;

#[test]
fn time_prints_server_time() {
    let server = StubServer::spawn(200, b"1234567890");
    let config = config_for_port(server.port);

    tether(&config)
        .arg("time")
        .assert()
        .success()
        .stdout("1234567890\n");

    let received = server.received();
    assert_eq!(received[0].request_line, "POST /time HTTP/1.1");
    assert_eq!(received[0].body, b"command=get_time");
}

#[test]
fn time_json_output() {
    let server = StubServer::spawn(200, b"77");
    let config = config_for_port(server.port);

    let output = tether(&config).args(["time", "-o", "json"]).output().unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["time"], 77);
}

#[test]
fn time_fails_on_non_numeric_reply() {
    let server = StubServer::spawn(200, b"<html>portal</html>");
    let config = config_for_port(server.port);

    tether(&config)
        .arg("time")
        .assert()
        .failure()
        .stderr(predicate::str::contains("non-numeric"));
}

#[test]
fn reachable_success() {
    let server = StubServer::spawn(200, b"1");
    let config = config_for_port(server.port);

    tether(&config).arg("reachable").assert().success().stdout("reachable\n");
}

#[test]
fn reachable_failure_exits_nonzero() {
    let config = config_for_port(closed_port());

    tether(&config)
        .arg("reachable")
        .assert()
        .failure()
        .stdout("unreachable\n")
        .stderr(predicate::str::contains("server is not reachable"));
}

#[test]
fn port_flag_overrides_config() {
    let server = StubServer::spawn(200, b"5");
    let config = config_for_port(closed_port());

    tether(&config)
        .args(["time", "--port", &server.port.to_string()])
        .assert()
        .success()
        .stdout("5\n");
}

#[test]
fn server_flag_overrides_config() {
    let server = StubServer::spawn(200, b"6");
    let config = write_config("[server]\nhost = \"unused.invalid\"\n");

    tether(&config)
        .args(["--server", &format!("http://127.0.0.1:{}", server.port), "time"])
        .assert()
        .success()
        .stdout("6\n");
}

#[test]
fn post_file_with_env_token() {
    let server = StubServer::spawn(200, b"sync-reply");
    let config = config_for_port(server.port);
    let temp = TempDir::new().unwrap();
    let request = temp.path().join("request.bin");
    std::fs::write(&request, b"sync-request").unwrap();

    tether(&config)
        .env("TETHER_AUTH_TOKEN", "env-token")
        .arg("post")
        .arg(&request)
        .assert()
        .success()
        .stdout("sync-reply");

    let received = &server.received()[0];
    assert_eq!(
        received.request_line,
        "POST /command/?client=tether&client_id=cli-test HTTP/1.1"
    );
    assert_eq!(received.header("authorization"), Some("Bearer env-token"));
    assert_eq!(received.body, b"sync-request");
}

#[test]
fn post_stdin_with_explicit_token_and_path() {
    let server = StubServer::spawn(200, b"ok");
    let config = config_for_port(server.port);

    tether(&config)
        .args(["post", "--path", "/admin/", "--auth-token", "flag-token"])
        .write_stdin("from-stdin")
        .assert()
        .success()
        .stdout("ok");

    let received = &server.received()[0];
    assert_eq!(received.request_line, "POST /admin/ HTTP/1.1");
    assert_eq!(received.header("authorization"), Some("Bearer flag-token"));
    assert_eq!(received.body, b"from-stdin");
}

#[test]
fn post_rejected_credentials_reports_status() {
    let server = StubServer::spawn(401, b"");
    let config = config_for_port(server.port);

    tether(&config)
        .arg("post")
        .write_stdin("q")
        .assert()
        .failure()
        .stderr(predicate::str::contains("server status: sync_auth_error"));
}

#[test]
fn watch_prints_status_changes() {
    let server = StubServer::spawn(200, b"1");
    let config = config_for_port(server.port);

    tether(&config)
        .args(["watch", "-n", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("status_changed status=none reachable=true"))
        .stdout(predicate::str::contains("shutdown"));
}

#[test]
fn watch_reports_unreachable_server() {
    let config = config_for_port(closed_port());

    tether(&config)
        .args(["watch", "-n", "1", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\":\"unavailable\""));
}

#[test]
fn missing_explicit_config_fails() {
    tether_bare()
        .args(["--config", "/nonexistent/tether.toml", "time"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn env_config_path_is_used() {
    let server = StubServer::spawn(200, b"9");
    let config = config_for_port(server.port);

    tether_bare()
        .env("TETHER_CONFIG", &config.path)
        .arg("time")
        .assert()
        .success()
        .stdout("9\n");
}

#[test]
fn invalid_config_fails() {
    let config = write_config("[server\n");

    tether(&config)
        .arg("reachable")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse"));
}
