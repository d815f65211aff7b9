//! Smoke tests for the itemctl binary

use assert_cmd::Command;
use predicates::prelude::*;

fn itemctl() -> Command {
    let mut cmd = Command::cargo_bin("itemctl").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

// === Pattern Command Tests ===

#[test]
fn test_pattern_from_stdin() {
    let output = itemctl()
        .arg("pattern")
        .write_stdin("3\n")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    assert!(stdout.starts_with("Enter the size of the pattern: "));

    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|line| line.matches('*').count() == 3));
}

#[test]
fn test_pattern_zero_prints_nothing() {
    itemctl()
        .arg("pattern")
        .write_stdin("0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("*").not());
}

#[test]
fn test_pattern_rejects_non_integer() {
    itemctl()
        .arg("pattern")
        .write_stdin("three\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("*").not())
        .stderr(predicate::str::contains("invalid pattern size"));
}

#[test]
fn test_pattern_rejects_empty_stdin() {
    itemctl()
        .arg("pattern")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no pattern size"));
}

#[test]
fn test_pattern_size_flag_skips_prompt() {
    itemctl()
        .args(["pattern", "--size", "2", "--marker", "#"])
        .assert()
        .success()
        .stdout("##\n##\n");
}

#[test]
fn test_pattern_negative_size_flag() {
    itemctl()
        .args(["pattern", "--size", "-3"])
        .assert()
        .success()
        .stdout("");
}

// === Serve Command Tests ===

#[test]
fn test_serve_help() {
    itemctl()
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Database URL"));
}

#[test]
fn test_serve_fails_fast_on_unopenable_database() {
    let dir = tempfile::TempDir::new().unwrap();
    let url = format!(
        "sqlite://{}",
        dir.path().join("missing-dir").join("items.db").display()
    );

    itemctl()
        .args(["serve", "--bind", "127.0.0.1:0", "--database-url", &url])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Server error"));
}
