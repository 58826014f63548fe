//! Smoke tests for the stormline binary surface.

#![allow(clippy::panic)]

use assert_cmd::Command;
use predicates::prelude::*;

fn stormline() -> Command {
    let mut cmd = Command::cargo_bin("stormline")
        .unwrap_or_else(|e| panic!("binary not built: {e}"));
    // Keep the test hermetic regardless of the developer's shell.
    cmd.env_remove("GROQ_API_KEY")
        .env_remove("API_KEY")
        .env_remove("LIVESTORM_API_KEY")
        .env_remove("LS_API_KEY");
    cmd
}

#[test]
fn test_help_lists_commands() {
    stormline()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("ask"))
        .stdout(predicate::str::contains("events"))
        .stdout(predicate::str::contains("analytics"));
}

#[test]
fn test_version_flag() {
    stormline()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("stormline"));
}

#[test]
fn test_unknown_command_fails() {
    stormline().arg("frobnicate").assert().failure();
}

#[test]
fn test_ask_requires_question() {
    stormline().arg("ask").assert().failure();
}

#[test]
fn test_events_without_credentials_is_clean_error() {
    stormline()
        .arg("events")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing credentials"));
}
