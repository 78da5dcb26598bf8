//! CLI smoke tests for the jsonapi-server binary.

use std::fs;
use std::process::{Command, Stdio};
use tempfile::tempdir;

/// Run the jsonapi-server binary with the given arguments.
fn run_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_jsonapi-server"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute jsonapi-server")
}

#[test]
fn help_lists_the_subcommands() {
    let output = run_server(&["--help"]);
    assert!(output.status.success(), "help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("jsonapi-server") || stdout.contains("JSON:API"));
    assert!(stdout.contains("Usage:") || stdout.contains("USAGE:"));
    assert!(stdout.contains("run"));
    assert!(stdout.contains("check"));
    assert!(stdout.contains("--config"));
}

#[test]
fn version_prints_a_number() {
    let output = run_server(&["--version"]);
    assert!(output.status.success(), "version command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("jsonapi-server"));
    assert!(stdout.chars().any(|c| c.is_ascii_digit()));
}

#[test]
fn unknown_subcommands_fail() {
    let output = run_server(&["frobnicate"]);
    assert!(!output.status.success(), "unknown subcommand should fail");
}

#[test]
fn check_accepts_a_valid_config() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("cfg.yaml");
    fs::write(
        &cfg_path,
        r#"
server:
  host: "127.0.0.1"
  port: 9191

gateway:
  progname: "widgets-api"
"#,
    )
    .unwrap();

    let output = run_server(&["--config", cfg_path.to_str().unwrap(), "check"]);
    assert!(output.status.success(), "check should accept valid config");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration check passed"));
    assert!(stdout.contains("widgets-api"));
}

#[test]
fn check_rejects_a_broken_config() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("cfg.yaml");
    fs::write(
        &cfg_path,
        r#"
server:
  host: "127.0.0.1"
  port: 9191
  serve_static: true
"#,
    )
    .unwrap();

    let output = run_server(&["--config", cfg_path.to_str().unwrap(), "check"]);
    assert!(
        !output.status.success(),
        "unknown config fields should be rejected"
    );
}

#[test]
fn print_config_emits_yaml() {
    let output = run_server(&["--print-config"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("server:"));
    assert!(stdout.contains("gateway:"));
}
