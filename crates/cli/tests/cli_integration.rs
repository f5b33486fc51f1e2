//! CLI integration tests for the `funcdef` binary.
//!
//! Uses `assert_cmd` to spawn the binary and verify exit codes, stdout
//! content, and stderr content.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const GREET: &str = r#"FUNC Greet (lang="en", retries=3) BEGIN print(1) END @owner="x";"#;

/// Helper: create a Command for the `funcdef` binary.
fn funcdef() -> Command {
    cargo_bin_cmd!("funcdef")
}

/// Helper: write `contents` to a file in a fresh temp dir.
fn script(contents: &str) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("greet.func");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

// ──────────────────────────────────────────────
// 1. Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    funcdef()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("FUNC definition parser"));
}

#[test]
fn version_prints_crate_version() {
    funcdef()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn no_subcommand_is_a_usage_error() {
    funcdef().assert().failure().code(2);
}

// ──────────────────────────────────────────────
// 2. parse: success
// ──────────────────────────────────────────────

#[test]
fn parse_file_prints_text_summary() {
    let (_dir, path) = script(GREET);
    funcdef()
        .arg("parse")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Function: Greet"))
        .stdout(predicate::str::contains(
            r#"Configuration: (lang="en", retries=3)"#,
        ))
        .stdout(predicate::str::contains(r#"@owner = "x""#))
        .stdout(predicate::str::contains("Definition: print(1)"));
}

#[test]
fn parse_file_as_json() {
    let (_dir, path) = script(GREET);
    let output = funcdef()
        .args(["--output", "json", "parse"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["functionName"], "Greet");
    assert_eq!(json["configuration"]["lang"], "en");
    assert_eq!(json["configuration"]["retries"], 3.0);
    assert_eq!(json["definition"], "print(1)");
    assert_eq!(json["annotations"]["owner"], "x");
}

#[test]
fn parse_reads_stdin_when_no_file_given() {
    funcdef()
        .args(["parse"])
        .write_stdin(GREET)
        .assert()
        .success()
        .stdout(predicate::str::contains("Function: Greet"));

    funcdef()
        .args(["parse", "-"])
        .write_stdin(GREET)
        .assert()
        .success()
        .stdout(predicate::str::contains("Function: Greet"));
}

#[test]
fn trailing_newline_in_file_is_accepted() {
    let (_dir, path) = script(&format!("{}\n", GREET));
    funcdef().arg("parse").arg(&path).assert().success();
}

#[test]
fn multi_line_body_is_joined() {
    let (_dir, path) = script("FUNC F ()\nBEGIN\n  step1\n  step2\nEND\n@k=\"v\";\n");
    funcdef()
        .args(["--output", "json", "parse"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""definition": "  step1  step2""#));
}

#[test]
fn quiet_suppresses_success_output() {
    let (_dir, path) = script(GREET);
    funcdef()
        .args(["--quiet", "parse"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn explicit_start_rule_is_accepted() {
    let (_dir, path) = script(GREET);
    funcdef()
        .args(["parse", "--start-rule", "FuncDefinition"])
        .arg(&path)
        .assert()
        .success();
}

// ──────────────────────────────────────────────
// 3. parse: errors
// ──────────────────────────────────────────────

#[test]
fn syntax_error_reports_position_and_exits_1() {
    let (_dir, path) = script(r#"FUNC F (a=1 BEGIN x END @k="v";"#);
    funcdef()
        .arg("parse")
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            r#":1:13: Expected ")" or "," but "B" found."#,
        ));
}

#[test]
fn syntax_error_as_json() {
    let output = funcdef()
        .args(["--output", "json", "parse"])
        .write_stdin(r#"FUNC F (a=1 BEGIN x END @k="v";"#)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(json["found"], "B");
    assert_eq!(json["location"]["start"]["offset"], 12);
    assert!(json["message"].as_str().unwrap().starts_with("Expected"));
}

#[test]
fn quiet_text_error_prints_nothing() {
    funcdef()
        .args(["--quiet", "parse"])
        .write_stdin("FUNC")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::is_empty());
}

#[test]
fn missing_annotations_fail() {
    funcdef()
        .arg("parse")
        .write_stdin("FUNC F () BEGIN x END")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<stdin>:1:22"));
}

#[test]
fn unknown_start_rule_is_rejected() {
    funcdef()
        .args(["parse", "--start-rule", "Value"])
        .write_stdin(GREET)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            r#"Can't start parsing from rule "Value"."#,
        ));
}

#[test]
fn missing_file_reports_read_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.func");
    funcdef()
        .arg("parse")
        .arg(&missing)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error reading"));
}

#[test]
fn missing_file_json_error_is_an_object() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.func");
    let output = funcdef()
        .args(["--output", "json", "parse"])
        .arg(&missing)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert!(json["error"].as_str().unwrap().contains("nope.func"));
}
