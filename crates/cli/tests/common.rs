// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// `tether` with a clean environment.
pub fn tether_bare() -> Command {
    let mut cmd = cargo_bin_cmd!("tether");
    cmd.env_remove("TETHER_CONFIG")
        .env_remove("TETHER_AUTH_TOKEN")
        .env_remove("TETHER_CLIENT_ID")
        .env_remove("RUST_LOG");
    cmd
}

/// `tether` with a clean environment and an isolated config file.
pub fn tether(config: &Config) -> Command {
    let mut cmd = tether_bare();
    cmd.arg("--config").arg(&config.path);
    cmd
}

/// A config file in a temp directory.
pub struct Config {
    pub path: PathBuf,
    _dir: TempDir,
}

/// Writes a config pointing at `port` on loopback.
pub fn config_for_port(port: u16) -> Config {
    write_config(&format!(
        "client_id = \"cli-test\"\nrequest_timeout_secs = 5\n\n[server]\nhost = \"127.0.0.1\"\nport = {}\n",
        port
    ))
}

pub fn write_config(content: &str) -> Config {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, content).unwrap();
    Config { path, _dir: dir }
}

/// A port with nothing listening on it.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// A request as received by the stub.
#[derive(Debug, Clone)]
pub struct Received {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Received {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// HTTP/1.1 stub answering every request with the same code and body.
pub struct StubServer {
    pub port: u16,
    received: Arc<Mutex<Vec<Received>>>,
}

impl StubServer {
    pub fn spawn(code: u16, body: &[u8]) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        let body = body.to_vec();

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                let sink = Arc::clone(&sink);
                let body = body.clone();
                thread::spawn(move || serve(stream, code, &body, &sink));
            }
        });

        StubServer { port, received }
    }

    pub fn received(&self) -> Vec<Received> {
        self.received.lock().unwrap().clone()
    }
}

fn serve(stream: TcpStream, code: u16, body: &[u8], sink: &Mutex<Vec<Received>>) {
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).unwrap_or(0) == 0 {
        return;
    }

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap_or(0) == 0 {
            return;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((k, v)) = line.split_once(':') {
            headers.push((k.trim().to_string(), v.trim().to_string()));
        }
    }

    let length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut request_body = vec![0u8; length];
    if reader.read_exact(&mut request_body).is_err() {
        return;
    }
    sink.lock().unwrap().push(Received {
        request_line: request_line.trim_end().to_string(),
        headers,
        body: request_body,
    });

    let mut stream = stream;
    let head = format!(
        "HTTP/1.1 {} Stub\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        code,
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
    let _ = stream.flush();
}
