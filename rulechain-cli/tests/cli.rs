//! End-to-end tests for the `rulechain` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const SCHEMA: &str = r#"
[[fields]]
name = "username"
rules = "required|alpha_dash|between:3,12"

[[fields]]
name = "age"
rules = "nullable|numeric|min:18"
"#;

fn rulechain() -> Command {
    let mut cmd = Command::cargo_bin("rulechain").unwrap();
    cmd.env_remove("RULECHAIN_VALIDATION_MODE")
        .env_remove("RULECHAIN_CONFIG")
        .env_remove("RULECHAIN_LOG_LEVEL")
        .env_remove("RULECHAIN_LOG_FORMAT")
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

fn schema(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("schema.toml");
    fs::write(&path, SCHEMA).unwrap();
    path
}

#[test]
fn test_check_valid_record_from_file() {
    let dir = TempDir::new().unwrap();
    let record = dir.path().join("record.json");
    fs::write(&record, r#"{"username": "ada_l", "age": "36"}"#).unwrap();

    rulechain()
        .arg("check")
        .arg("--schema")
        .arg(schema(&dir))
        .arg("--record")
        .arg(&record)
        .assert()
        .success()
        .stdout(predicate::str::contains("record is valid"));
}

#[test]
fn test_check_invalid_record_from_stdin() {
    let dir = TempDir::new().unwrap();

    rulechain()
        .arg("check")
        .arg("-s")
        .arg(schema(&dir))
        .arg("-r")
        .arg("-")
        .write_stdin(r#"{"username": "jo", "age": "12"}"#)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "The username must be between 3 and 12 characters.",
        ))
        .stdout(predicate::str::contains("The age must be at least 18."));
}

#[test]
fn test_check_json_fail_fast() {
    let dir = TempDir::new().unwrap();

    let output = rulechain()
        .args(["check", "--json", "--mode", "fail-fast", "--schema"])
        .arg(schema(&dir))
        .write_stdin(r#"{"username": ""}"#)
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(
        report,
        serde_json::json!({
            "valid": false,
            "errors": {"username": "The username field is required."}
        })
    );
}

#[test]
fn test_check_batch_json() {
    let dir = TempDir::new().unwrap();

    let output = rulechain()
        .args(["check", "--json", "--schema"])
        .arg(schema(&dir))
        .write_stdin(r#"[{"username": "grace"}, {"username": "x!"}]"#)
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report[0], serde_json::json!({"valid": true}));
    assert_eq!(
        report[1]["errors"]["username"],
        serde_json::json!([
            "The username must only contain letters, numbers, dashes and underscores.",
            "The username must be between 3 and 12 characters."
        ])
    );
}

#[test]
fn test_check_mode_from_settings_file() {
    let dir = TempDir::new().unwrap();
    let settings = dir.path().join("rulechain.toml");
    fs::write(&settings, "[validation]\nmode = \"fail_fast\"\n").unwrap();

    rulechain()
        .arg("--config")
        .arg(&settings)
        .args(["check", "--json", "--schema"])
        .arg(schema(&dir))
        .write_stdin(r#"{"username": "x!"}"#)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            r#""username": "The username must only contain letters, numbers, dashes and underscores.""#,
        ));
}

#[test]
fn test_check_mode_from_env_file() {
    let dir = TempDir::new().unwrap();
    let env_file = dir.path().join("rulechain.env");
    fs::write(&env_file, "RULECHAIN_VALIDATION_MODE=fail_fast\n").unwrap();

    rulechain()
        .arg("--env-file")
        .arg(&env_file)
        .args(["check", "--json", "--schema"])
        .arg(schema(&dir))
        .write_stdin(r#"{"username": "x!"}"#)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            r#""username": "The username must only contain letters, numbers, dashes and underscores.""#,
        ))
        .stdout(predicate::str::contains("between").not());
}

#[test]
fn test_check_missing_env_file() {
    let dir = TempDir::new().unwrap();

    rulechain()
        .arg("--env-file")
        .arg(dir.path().join("absent.env"))
        .args(["check", "--schema"])
        .arg(schema(&dir))
        .write_stdin("{}")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_check_bad_json_exits_two() {
    let dir = TempDir::new().unwrap();

    rulechain()
        .args(["check", "--schema"])
        .arg(schema(&dir))
        .write_stdin("{not json")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid JSON"));
}

#[test]
fn test_check_missing_schema() {
    let dir = TempDir::new().unwrap();

    rulechain()
        .args(["check", "--schema"])
        .arg(dir.path().join("absent.toml"))
        .write_stdin("{}")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_parse_lists_directives() {
    rulechain()
        .args(["parse", "required_if:type,admin|bogus"])
        .assert()
        .success()
        .stdout(predicate::str::contains("required_if"))
        .stdout(predicate::str::contains("type, admin"))
        .stdout(predicate::str::contains("unknown rule"));
}

#[test]
fn test_parse_json() {
    let output = rulechain()
        .args(["parse", "--json", "nullable|min:3"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let directives: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(
        directives,
        serde_json::json!([
            {"name": "nullable", "params": [], "known": true},
            {"name": "min", "params": ["3"], "known": true}
        ])
    );
}

#[test]
fn test_rules_json() {
    let output = rulechain()
        .args(["rules", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let names: Vec<String> = serde_json::from_slice(&output).unwrap();
    assert!(names.contains(&"required".to_string()));
    assert!(names.contains(&"nullable".to_string()));
    assert!(names.contains(&"digits_between".to_string()));
}
