//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with HOME pointed at a scratch directory so
//! each test starts from the default configuration.

use std::io::Write;
use std::process::{Command, Stdio};

use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &TempDir, args: &[&str]) -> (String, String, i32) {
    run_cli_with_input(home, args, None)
}

fn run_cli_with_input(home: &TempDir, args: &[&str], input: Option<&str>) -> (String, String, i32) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_violetas"))
        .args(args)
        .env("HOME", home.path())
        .env_remove("VIOLETAS_ENV")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    if let Some(input) = input {
        child
            .stdin
            .take()
            .unwrap()
            .write_all(input.as_bytes())
            .unwrap();
    } else {
        drop(child.stdin.take());
    }

    let output = child.wait_with_output().expect("Failed to wait for CLI");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_status_json_follows_clock() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(&home, &["status", "--at", "2024-01-02T10:15", "--json"]);
    assert_eq!(code, 0);
    let snapshot = json(&stdout);
    assert_eq!(snapshot["type"], "StateSnapshot");
    assert_eq!(snapshot["language"], "en");
    assert_eq!(snapshot["segment"], "greetings");

    let (stdout, _, _) = run_cli(&home, &["status", "--at", "2024-01-02T10:45", "--json"]);
    assert_eq!(json(&stdout)["language"], "es");

    let (stdout, _, _) = run_cli(&home, &["status", "--at", "2024-01-02T10:56", "--json"]);
    let snapshot = json(&stdout);
    assert_eq!(snapshot["segment"], "farewells");
    assert_eq!(snapshot["remaining_min"], 3);
}

#[test]
fn test_status_text_is_localized() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(&home, &["status", "--at", "2024-01-03T10:15"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Segmento en curso: saludos"));
}

#[test]
fn test_invalid_timestamp_is_rejected() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(&home, &["status", "--at", "next tuesday"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid timestamp"));
}

#[test]
fn test_groups_cover_everyone_present() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(
        &home,
        &["groups", "--at", "2024-01-02T10:10", "--seed", "3", "--absent", "Kim", "--json"],
    );
    assert_eq!(code, 0);
    let events = json(&stdout);
    let created = events
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["type"] == "GroupsCreated")
        .expect("groups created");

    let mut names: Vec<String> = ["group1", "group2"]
        .iter()
        .flat_map(|g| created["groups"][g].as_array().unwrap().clone())
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    names.sort();
    assert_eq!(
        names,
        ["Amanda", "Belle", "Cliona", "Dottie", "Jorge", "Nuria", "Sharon", "Ángel"]
    );
}

#[test]
fn test_groups_below_minimum() {
    let home = TempDir::new().unwrap();
    let args = [
        "groups", "--at", "2024-01-02T10:10", "--absent", "Kim", "--absent", "Sharon",
        "--absent", "Amanda", "--absent", "Belle",
    ];
    let (stdout, _, code) = run_cli(&home, &args);
    assert_eq!(code, 0);
    assert!(stdout.contains("Not enough attendees for breakout groups (5/6)"));
}

#[test]
fn test_groups_unknown_absentee() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(&home, &["groups", "--absent", "Nobody"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown member: Nobody"));
}

#[test]
fn test_config_get_and_set() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(&home, &["config", "get", "clock.farewell_minute"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "55");

    let (_, _, code) = run_cli(&home, &["config", "set", "groups.min_attendees", "8"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(&home, &["config", "get", "groups.min_attendees"]);
    assert_eq!(stdout.trim(), "8");

    let (_, stderr, code) = run_cli(&home, &["config", "set", "groups.min_attendees", "5"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("groups.min_attendees"));
    let (stdout, _, _) = run_cli(&home, &["config", "get", "groups.min_attendees"]);
    assert_eq!(stdout.trim(), "8");
}

#[test]
fn test_config_unknown_key() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(&home, &["config", "get", "clock.nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_session_reads_commands_from_stdin() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli_with_input(
        &home,
        &["session", "--at", "2024-01-02T10:05"],
        Some("toggle english Kim\ngroups\nreset\nquit\n"),
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("Kim: absent"));
    assert!(stdout.contains("Round 1"));
    assert!(stdout.contains("Group 1: "));
    assert!(stdout.contains("New session"));
}
