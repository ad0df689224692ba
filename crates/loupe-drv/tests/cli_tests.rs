//! CLI end-to-end tests.
//!
//! Runs the built `loupe` binary against temp files and checks the JSON
//! envelope, the stable error codes, and the exit behavior.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn loupe_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_loupe"))
}

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("create temp source file");
    file.write_all(contents.as_bytes()).expect("write temp source file");
    path
}

fn run_ok(path: &Path, extract: &str) -> Value {
    let output = Command::new(loupe_bin())
        .arg(path)
        .arg(extract)
        .output()
        .expect("run loupe");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is one JSON object")
}

fn run_err(args: &[&str]) -> Value {
    let output = Command::new(loupe_bin()).args(args).output().expect("run loupe");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    serde_json::from_slice(&output.stderr).expect("stderr is one JSON object")
}

#[test]
fn test_symbols_from_markdown_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "notes.md", "# Section One\nline one\nline two\n");

    let report = run_ok(&path, "symbols");
    assert_eq!(report["ok"], true);
    assert_eq!(report["extract"], "symbols");
    assert_eq!(report["language"], ".md");
    assert_eq!(report["count"], report["result"].as_array().unwrap().len() as u64);

    let heading = report["result"]
        .as_array()
        .unwrap()
        .iter()
        .find(|symbol| symbol["kind"] == "heading")
        .expect("a heading symbol");
    assert_eq!(heading["nameRange"]["start"]["line"], 1);
    assert!(heading["name"].as_str().unwrap().starts_with('#'));
}

#[test]
fn test_tokens_from_javascript_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "app.js", "function greet() { return 1; }\n");

    let report = run_ok(&path, "token");
    assert_eq!(report["ok"], true);
    assert_eq!(report["extract"], "token");
    assert_eq!(report["language"], ".js");

    let tokens = report["result"].as_array().unwrap();
    assert_eq!(report["count"].as_u64().unwrap() as usize, tokens.len());
    assert_eq!(tokens[0]["type"], "keyword");
    assert_eq!(tokens[0]["value"], "function");
    assert_eq!(tokens[0]["range"]["start"]["offset"], 0);
}

#[test]
fn test_language_flag_overrides_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "notes.txt", "# Heading\n");

    let output = Command::new(loupe_bin())
        .arg(&path)
        .arg("symbols")
        .args(["--language", "markdown"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["language"], "markdown");

    // Short form.
    let output = Command::new(loupe_bin())
        .arg(&path)
        .arg("symbols")
        .args(["-l", ".md"])
        .output()
        .unwrap();
    assert!(output.status.success());
}

#[test]
fn test_no_arguments_prints_usage_and_succeeds() {
    Command::new(loupe_bin())
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage").or(predicate::str::contains("loupe")));
}

#[test]
fn test_help_flag_prints_usage_and_succeeds() {
    for flag in ["--help", "-h"] {
        Command::new(loupe_bin())
            .arg(flag)
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage"));
    }
}

#[test]
fn test_invalid_extract_mode() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "app.js", "let x = 1;\n");

    let error = run_err(&[path.to_str().unwrap(), "ast"]);
    assert_eq!(error["ok"], false);
    assert_eq!(error["error"]["code"], "INVALID_EXTRACT");
}

#[test]
fn test_missing_extract_argument() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "app.js", "let x = 1;\n");

    let error = run_err(&[path.to_str().unwrap()]);
    assert_eq!(error["error"]["code"], "INVALID_ARGS");
}

#[test]
fn test_unknown_flag_is_invalid_args() {
    let error = run_err(&["file.js", "token", "--frobnicate"]);
    assert_eq!(error["error"]["code"], "INVALID_ARGS");
}

#[test]
fn test_language_required_without_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "Makefile", "all:\n");

    let error = run_err(&[path.to_str().unwrap(), "token"]);
    assert_eq!(error["error"]["code"], "LANGUAGE_REQUIRED");
}

#[test]
fn test_unknown_language() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "app.js", "let x = 1;\n");

    let error = run_err(&[path.to_str().unwrap(), "token", "-l", "cobol"]);
    assert_eq!(error["error"]["code"], "UNKNOWN_LANGUAGE");
    assert!(error["error"]["message"]
        .as_str()
        .unwrap()
        .contains("cobol"));
}

#[test]
fn test_unreadable_file_is_execution_error() {
    let error = run_err(&["definitely/not/a/file.js", "token"]);
    assert_eq!(error["error"]["code"], "EXECUTION_ERROR");
}

#[test]
fn test_uppercase_extension_resolves() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "DATA.JSON", "{\"a\": 1}\n");

    let report = run_ok(&path, "token");
    assert_eq!(report["language"], ".json");
    assert!(report["count"].as_u64().unwrap() > 0);
}
