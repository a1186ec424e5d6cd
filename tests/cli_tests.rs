//! End-to-end tests for the `necrologctl` poster
//!
//! These tests verify:
//! - An empty message is refused with a non-zero exit and a stderr message
//! - A posted event lands in the target log through a live ingestion server

#![cfg(feature = "http")]

use assert_cmd::Command;
use necrolog::ingest::server::{start, LOG_ROUTE};
use necrolog::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn necrologctl() -> Command {
    Command::cargo_bin("necrologctl").expect("Failed to find necrologctl binary")
}

#[test]
fn test_empty_message_exits_with_error() {
    necrologctl()
        .args(["--path", "/tmp/never-written.log", "--endpoint", "http://127.0.0.1:9/log"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("log message cannot be empty"));
}

#[test]
fn test_unreachable_endpoint_fails() {
    // Port 9 (discard) is not expected to run an HTTP server
    necrologctl()
        .args(["--msg", "nobody home", "--endpoint", "http://127.0.0.1:9/log"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to send request"));
}

#[test]
fn test_post_reaches_the_log() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let registry = Arc::new(Registry::new(
        LogConfig::default().with_status_dir(temp_dir.path().join("status")),
    ));
    let runtime = tokio::runtime::Runtime::new().expect("Failed to build runtime");
    let server = runtime
        .block_on(start("127.0.0.1:0".parse().unwrap(), Arc::clone(&registry)))
        .expect("server starts");
    let endpoint = format!("http://{}{}", server.addr(), LOG_ROUTE);
    let target = temp_dir.path().join("cli.log");

    necrologctl()
        .args([
            "--path",
            target.to_str().unwrap(),
            "--level",
            "error",
            "--msg",
            "posted from the command line",
            "--endpoint",
            endpoint.as_str(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("[necrologctl] response: ok"));

    necrologctl()
        .args(["--path", "", "--msg", "no path", "--endpoint", endpoint.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("response: missing path or msg"));

    server.shutdown();

    let content = fs::read_to_string(&target).expect("Failed to read log file");
    let record: serde_json::Value = serde_json::from_str(content.trim_end()).unwrap();
    assert_eq!(record["level"], "ERROR");
    assert_eq!(record["msg"], "posted from the command line");
}
