//! Tests that run the built binary.

use std::net::TcpListener;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Run the binary against an empty config so user settings do not leak in.
fn counterdeck(args: &[&str]) -> Output {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = dir.path().join("config.toml");
    Command::new(env!("CARGO_BIN_EXE_counterdeck"))
        .arg("--config")
        .arg(&config)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_help_lists_options_and_commands() {
    let output = Command::new(env!("CARGO_BIN_EXE_counterdeck"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for needle in ["--offline", "--url", "--seed", "--theme", "increment", "reset", "get"] {
        assert!(stdout.contains(needle), "missing {needle} in:\n{stdout}");
    }
}

#[test]
fn test_offline_get_prints_zero() {
    let output = counterdeck(&["--offline", "get"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "0");
}

#[test]
fn test_offline_increment_prints_value_and_message() {
    let output = counterdeck(&["--offline", "increment"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["1", "Counter incremented successfully!"]);
}

#[test]
fn test_offline_reset_prints_message() {
    let output = counterdeck(&["--offline", "reset"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Counter reset successfully!"));
}

#[test]
fn test_invalid_theme_exits_with_error() {
    let output = counterdeck(&["--theme", "neon", "--offline", "get"]);

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown theme 'neon'"), "got: {stderr}");
    assert!(stderr.contains("Available themes:"));
}

#[test]
fn test_unreachable_service_exits_with_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
        listener.local_addr().unwrap().port()
    };
    let url = format!("http://127.0.0.1:{port}");
    let output = counterdeck(&["--url", &url, "get"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to load counter. Please try again."),
        "got: {stderr}"
    );
}

#[test]
fn test_bad_url_is_rejected_before_running() {
    let output = counterdeck(&["--url", "localhost:4943", "get"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("http://"), "got: {stderr}");
}

#[test]
fn test_unopenable_log_file_falls_back_to_stderr() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = dir.path().join("missing").join("counterdeck.log");
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
        listener.local_addr().unwrap().port()
    };
    let url = format!("http://127.0.0.1:{port}");
    let output = counterdeck(&[
        "--log-file",
        log_file.to_str().unwrap(),
        "--url",
        &url,
        "get",
    ]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to open log file"), "got: {stderr}");
    assert!(stderr.contains("Counter operation failed"), "got: {stderr}");
}
