//! End-to-end tests: the full scenario list against a mock backend.
//!
//! The in-process tests drive `ProbeRunner` with the real reqwest adapter on
//! a current-thread runtime; the binary tests check configuration handling
//! and exit codes.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::process::{Command, Output};
use std::sync::Arc;

use apiprobe_application::ProbeRunner;
use apiprobe_domain::{ProbeConfig, RunSummary, Scenario, ScenarioOutcome};
use apiprobe_infrastructure::{ConsoleReporter, ReqwestHttpClient};
use mockito::{Matcher, Server, ServerGuard};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

const RECORD_ID: &str = "3f0d6a52-8c1e-4f5b-9a7e-2b1c0d9e8f7a";
const CLIENT_NAME: &str = "BitSafe Test Client";

/// Registers the endpoints of a well-behaved backend. With `persist` off,
/// created records never show up in the listing.
fn mock_backend(server: &mut ServerGuard, persist: bool) {
    server
        .mock("GET", "/api/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Hello World"}"#)
        .create();

    server
        .mock("POST", "/api/status")
        .match_body(Matcher::Json(json!({"client_name": CLIENT_NAME})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": RECORD_ID,
                "client_name": CLIENT_NAME,
                "timestamp": "2025-06-01T12:00:00.000000"
            })
            .to_string(),
        )
        .create();

    let listing = if persist {
        json!([
            {"id": "older", "client_name": "Someone Else", "timestamp": "2025-05-01T00:00:00"},
            {"id": RECORD_ID, "client_name": CLIENT_NAME, "timestamp": "2025-06-01T12:00:00.000000"}
        ])
    } else {
        json!([])
    };
    server
        .mock("GET", "/api/status")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(listing.to_string())
        .create();

    server
        .mock("OPTIONS", "/api/")
        .match_header("origin", "http://example.com")
        .with_status(200)
        .with_header("access-control-allow-origin", "http://example.com")
        .with_header(
            "access-control-allow-methods",
            "DELETE, GET, HEAD, OPTIONS, PATCH, POST, PUT",
        )
        .with_header("access-control-allow-headers", "Content-Type")
        .create();

    server
        .mock("GET", "/api/nonexistent")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail":"Not Found"}"#)
        .create();
}

fn run_binary(env: &[(&str, &str)]) -> Output {
    let scratch = TempDir::new().unwrap();
    let missing_env_file = scratch.path().join("frontend.env");

    let mut command = Command::new(env!("CARGO_BIN_EXE_apiprobe"));
    command
        .env_remove("REACT_APP_BACKEND_URL")
        .env("APIPROBE_ENV_FILE", &missing_env_file);
    for (key, value) in env {
        command.env(key, value);
    }
    command.output().expect("failed to run apiprobe binary")
}

fn run_in_process(server: &ServerGuard, reporter: &mut ConsoleReporter<Vec<u8>>) -> RunSummary {
    let config = ProbeConfig::new(&server.url()).unwrap();
    let runner = ProbeRunner::new(Arc::new(ReqwestHttpClient::new().unwrap()), config);
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(runner.run(reporter))
}

#[test]
fn test_full_run_against_healthy_backend() {
    let mut server = Server::new();
    mock_backend(&mut server, true);

    let mut reporter = ConsoleReporter::new(Vec::new());
    let summary = run_in_process(&server, &mut reporter);

    assert_eq!(summary.tests_run(), 6);
    assert_eq!(summary.failures(), 0, "{summary:#?}");
    assert_eq!(summary.errors(), 0, "{summary:#?}");
    assert_eq!(summary.exit_code(), 0);

    let output = String::from_utf8(reporter.into_inner()).unwrap();
    assert!(output.contains("✅ All tests passed successfully!"));
}

#[test]
fn test_created_record_missing_from_listing_fails() {
    let mut server = Server::new();
    mock_backend(&mut server, false);

    let summary = run_in_process(&server, &mut ConsoleReporter::new(Vec::new()));

    let listing = summary
        .reports
        .iter()
        .find(|r| r.scenario == Scenario::ListStatusChecks)
        .unwrap();
    assert_eq!(
        listing.outcome,
        ScenarioOutcome::Failed {
            messages: vec![format!("Could not find our test entry with ID {RECORD_ID}")],
        }
    );
    assert_eq!(summary.failures(), 1);
    assert_eq!(summary.exit_code(), 1);
}

#[test]
fn test_binary_exits_zero_when_all_pass() {
    let mut server = Server::new();
    mock_backend(&mut server, true);

    let url = server.url();
    let output = run_binary(&[("REACT_APP_BACKEND_URL", url.as_str())]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0), "stdout:\n{stdout}");
    assert!(stdout.contains(&format!("Testing backend API at: {}/api", server.url())));
    assert!(stdout.contains("Tests run: 6\nErrors: 0\nFailures: 0"));
}

#[test]
fn test_binary_exits_one_on_failure() {
    let mut server = Server::new();
    mock_backend(&mut server, false);

    let url = server.url();
    let output = run_binary(&[("REACT_APP_BACKEND_URL", url.as_str())]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1), "stdout:\n{stdout}");
    assert!(stdout.contains("=== Test Failures ==="));
    assert!(stdout.contains(&format!(
        "test_03_get_status_checks: Could not find our test entry with ID {RECORD_ID}"
    )));
}

#[test]
fn test_binary_reads_env_file() {
    let mut server = Server::new();
    mock_backend(&mut server, true);

    let dir = TempDir::new().unwrap();
    let env_file = dir.path().join(".env");
    std::fs::write(
        &env_file,
        format!("REACT_APP_BACKEND_URL={}\n", server.url()),
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_apiprobe"))
        .env_remove("REACT_APP_BACKEND_URL")
        .env("APIPROBE_ENV_FILE", &env_file)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_binary_without_backend_url_fails_before_any_request() {
    let output = run_binary(&[]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("REACT_APP_BACKEND_URL not found in environment variables"));
    assert!(!stdout.contains("Testing backend API at"));
}

#[test]
fn test_binary_with_unreachable_backend_reports_errors() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let url = format!("http://127.0.0.1:{port}");
    let output = run_binary(&[("REACT_APP_BACKEND_URL", url.as_str())]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("Tests run: 6\nErrors: 6\nFailures: 0"));
}
