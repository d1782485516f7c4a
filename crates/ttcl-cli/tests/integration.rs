//! Integration tests for ttcl CLI commands.
//!
//! These tests run the actual binary and verify end-to-end behavior.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Path to the ttcl binary built for this test run.
fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_ttcl"))
}

/// Path to an SVG under tests/fixtures.
fn fixture(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/fixtures");
    path.push(name);
    path
}

#[test]
fn check_lists_colliding_pairs() {
    let output = Command::new(binary_path())
        .arg("check")
        .arg(fixture("scene.svg"))
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(output.status.code(), Some(1), "collisions should exit with 1");
    assert!(stdout.contains("c1 <-> l1"), "got: {}", stdout);
    assert!(stdout.contains("c2 <-> l2"), "got: {}", stdout);
    assert!(!stdout.contains("c1 <-> l2"), "got: {}", stdout);
    assert!(!stdout.contains("template"), "defs must be skipped: {}", stdout);
    assert!(stdout.contains("2 colliding pair(s) among 4 shapes"), "got: {}", stdout);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Loaded 4 shapes"), "got: {}", stderr);
}

#[test]
fn check_json_output() {
    let output = Command::new(binary_path())
        .args(["check", "-q", "--format", "json"])
        .arg(fixture("scene.svg"))
        .output()
        .expect("Failed to execute command");

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Output should be valid JSON");
    assert_eq!(json["shapes"], 4);
    assert_eq!(json["pairs"].as_array().map(Vec::len), Some(2));
    assert_eq!(json["pairs"][0]["a"], "c1");
    assert_eq!(json["pairs"][0]["b"], "l1");

    assert!(output.stderr.is_empty(), "--quiet should silence stderr");
}

#[test]
fn check_clear_scene_exits_zero() {
    let output = Command::new(binary_path())
        .args(["check", "-q"])
        .arg(fixture("clear.svg"))
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("0 colliding pair(s) among 3 shapes"), "got: {}", stdout);
}

#[test]
fn check_reads_stdin() {
    let mut child = Command::new(binary_path())
        .args(["check", "-q", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to spawn command");

    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(br#"<svg><circle r="1"/><circle cx="1" r="1"/></svg>"#)
        .expect("Failed to write stdin");

    let output = child.wait_with_output().expect("Failed to wait for command");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("#0 <-> #1"));
}

#[test]
fn pair_uses_ids() {
    let run = |a: &str, b: &str| {
        Command::new(binary_path())
            .args(["pair", "-q"])
            .arg(fixture("scene.svg"))
            .args([a, b])
            .output()
            .expect("Failed to execute command")
    };

    let hit = run("l1", "c1");
    assert_eq!(String::from_utf8_lossy(&hit.stdout).trim(), "true");
    assert_eq!(hit.status.code(), Some(1));

    let miss = run("c2", "l1");
    assert_eq!(String::from_utf8_lossy(&miss.stdout).trim(), "false");
    assert_eq!(miss.status.code(), Some(0));
}

#[test]
fn pair_unknown_id_is_an_error() {
    let output = Command::new(binary_path())
        .args(["pair", "-q"])
        .arg(fixture("scene.svg"))
        .args(["c1", "nope"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("no shape with id 'nope'"));
}

#[test]
fn missing_file_is_an_error() {
    let output = Command::new(binary_path())
        .args(["check", "does-not-exist.svg"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
}

#[test]
fn unknown_command_prints_usage() {
    let output = Command::new(binary_path())
        .arg("frobnicate")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage:"));
}
