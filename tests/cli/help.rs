use crate::support::numhist;
use predicates::prelude::*;

// ============================================================================
// Help, version and exit code tests
// ============================================================================

#[test]
fn test_help_flag() {
    numhist()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: numhist"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("add-history"))
        .stdout(predicate::str::contains("history"))
        .stdout(predicate::str::contains("approve"));
}

#[test]
fn test_version_flag() {
    numhist()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("numhist "));
}

#[test]
fn test_no_subcommand_prints_overview() {
    numhist()
        .assert()
        .success()
        .stdout(predicate::str::contains("moderated phone number history bot"))
        .stdout(predicate::str::contains("numhist --help"));
}

#[test]
fn test_unknown_command_is_usage_error() {
    numhist().arg("frobnicate").assert().code(2);
}

#[test]
fn test_unknown_format_is_usage_error() {
    numhist()
        .args(["--format", "yaml", "start"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn test_usage_error_json_envelope() {
    let output = numhist()
        .args(["--format", "json", "approve"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let err: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(err["error"]["code"], 2);
    assert_eq!(err["error"]["type"], "usage_error");
}
