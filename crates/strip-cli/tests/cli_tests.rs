//! Integration tests for the buildstrip CLI binary.
//!
//! These tests exercise the actual compiled binary using assert_cmd.

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use strip_test_utils::sources::{APP_JS, APP_JS_PRODUCTION, PLAIN_JS, UNTERMINATED_JS};

/// Get a Command for the buildstrip binary, isolated from the caller's env
fn buildstrip(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("buildstrip").expect("Failed to find buildstrip binary");
    cmd.current_dir(dir.path())
        .env("NO_COLOR", "1")
        .env_remove("BUILDSTRIP_MODE")
        .env_remove("BUILDSTRIP_CONFIG")
        .env_remove("BUILDSTRIP_LOG");
    cmd
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    dir.child("src/app.js").write_str(APP_JS).unwrap();
    dir.child("src/plain.js").write_str(PLAIN_JS).unwrap();
    dir
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn test_help_output() {
    let dir = TempDir::new().unwrap();
    buildstrip(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("strip"))
        .stdout(predicate::str::contains("scan"));
}

#[test]
fn test_version_output() {
    let dir = TempDir::new().unwrap();
    buildstrip(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("buildstrip"));
}

#[test]
fn test_no_command_shows_help_hint() {
    let dir = TempDir::new().unwrap();
    buildstrip(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("buildstrip --help"));
}

// ============================================================================
// Strip Tests
// ============================================================================

#[test]
fn test_strip_in_place() {
    let dir = project();
    buildstrip(&dir)
        .arg("strip")
        .assert()
        .success()
        .stdout(predicate::str::contains("src/app.js"))
        .stdout(predicate::str::contains("from 1 of 2 file(s)"));

    dir.child("src/app.js").assert(APP_JS_PRODUCTION);
    dir.child("src/plain.js").assert(PLAIN_JS);
}

#[test]
fn test_strip_to_output_directory() {
    let dir = project();
    buildstrip(&dir)
        .args(["strip", "src", "--out", "dist"])
        .assert()
        .success();

    dir.child("src/app.js").assert(APP_JS);
    dir.child("dist/app.js").assert(APP_JS_PRODUCTION);
    dir.child("dist/plain.js").assert(PLAIN_JS);
}

#[test]
fn test_strip_dry_run_prints_diff() {
    let dir = project();
    buildstrip(&dir)
        .args(["strip", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--- a/src/app.js"))
        .stdout(predicate::str::contains("-  mock.install();"))
        .stdout(predicate::str::contains("Would strip"));

    dir.child("src/app.js").assert(APP_JS);
}

#[test]
fn test_strip_mode_from_environment() {
    let dir = project();
    buildstrip(&dir)
        .arg("strip")
        .env("BUILDSTRIP_MODE", "development")
        .assert()
        .success()
        .stdout(predicate::str::contains("Stripped 0 region(s)"));

    dir.child("src/app.js").assert(APP_JS);
}

#[test]
fn test_strip_json_report() {
    let dir = project();
    let output = buildstrip(&dir)
        .args(["strip", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["mode"], "production");
    assert_eq!(report["report"]["processed"], 2);
    assert_eq!(report["report"]["rewritten"][0]["regions_removed"], 3);
}

#[test]
fn test_strip_failure_exits_non_zero() {
    let dir = project();
    dir.child("src/broken.js").write_str(UNTERMINATED_JS).unwrap();

    buildstrip(&dir)
        .arg("strip")
        .assert()
        .failure()
        .stdout(predicate::str::contains("src/broken.js"))
        .stderr(predicate::str::contains("1 file(s) could not be processed"));

    dir.child("src/broken.js").assert(UNTERMINATED_JS);
    dir.child("src/app.js").assert(APP_JS_PRODUCTION);
}

#[test]
fn test_strip_lenient_keeps_going() {
    let dir = project();
    dir.child("src/broken.js").write_str(UNTERMINATED_JS).unwrap();

    buildstrip(&dir)
        .args(["strip", "--lenient"])
        .assert()
        .success();
    dir.child("src/broken.js").assert(UNTERMINATED_JS);
}

#[test]
fn test_strip_uses_project_config() {
    let dir = project();
    dir.child("buildstrip.toml")
        .write_str("environments = [\"staging\"]\n")
        .unwrap();

    buildstrip(&dir)
        .args(["strip", "--mode", "production"])
        .assert()
        .success();
    dir.child("src/app.js").assert(APP_JS);

    buildstrip(&dir)
        .args(["strip", "--mode", "staging"])
        .assert()
        .success();
    dir.child("src/app.js").assert(APP_JS_PRODUCTION);
}

// ============================================================================
// Scan and Edit Tests
// ============================================================================

#[test]
fn test_scan_lists_regions() {
    let dir = project();
    buildstrip(&dir)
        .args(["scan", "src/app.js"])
        .assert()
        .success()
        .stdout(predicate::str::contains("block"))
        .stdout(predicate::str::contains("line-pair"))
        .stdout(predicate::str::contains("import { mock } from './mock';"));
}

#[test]
fn test_scan_reports_unterminated_marker() {
    let dir = TempDir::new().unwrap();
    dir.child("broken.js").write_str(UNTERMINATED_JS).unwrap();

    buildstrip(&dir)
        .args(["scan", "broken.js"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.js"));

    buildstrip(&dir)
        .args(["scan", "broken.js", "--lenient"])
        .assert()
        .success()
        .stdout(predicate::str::contains("line 2"));
}

#[test]
fn test_edit_prints_wrapped_text() {
    let dir = TempDir::new().unwrap();
    dir.child("a.js").write_str("a();\nb();\nc();\n").unwrap();

    buildstrip(&dir)
        .args(["edit", "a.js", "wrap-block", "--lines", "2"])
        .assert()
        .success()
        .stdout("a();\n/* BUILD_REMOVE_START */\nb();\n/* BUILD_REMOVE_END */\nc();\n");

    dir.child("a.js").assert("a();\nb();\nc();\n");
}

#[test]
fn test_edit_write_then_erase() {
    let dir = TempDir::new().unwrap();
    dir.child("a.js").write_str("a();\nb();\n").unwrap();

    buildstrip(&dir)
        .args(["edit", "a.js", "mark-line", "--lines", "2", "--write"])
        .assert()
        .success();
    dir.child("a.js").assert("a();\nb(); // BUILD_REMOVE\n");

    buildstrip(&dir)
        .args(["edit", "a.js", "erase-markers", "--write"])
        .assert()
        .success();
    dir.child("a.js").assert("a();\nb();\n");
}

#[test]
fn test_edit_unknown_command() {
    let dir = TempDir::new().unwrap();
    dir.child("a.js").write_str("a();\n").unwrap();

    buildstrip(&dir)
        .args(["edit", "a.js", "wrap-everything"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown command"));
}

#[test]
fn test_commands_lists_catalogue() {
    let dir = TempDir::new().unwrap();
    buildstrip(&dir)
        .arg("commands")
        .assert()
        .success()
        .stdout(predicate::str::contains("buildstrip.convertToInline"));
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn test_config_init_set_get() {
    let dir = TempDir::new().unwrap();
    buildstrip(&dir)
        .args(["config", "init"])
        .assert()
        .success();
    dir.child("buildstrip.toml").assert(predicate::path::is_file());

    buildstrip(&dir)
        .args(["config", "set", "lineMarker", "STRIP_LINE"])
        .assert()
        .success();
    buildstrip(&dir)
        .args(["config", "get", "lineMarker"])
        .assert()
        .success()
        .stdout("STRIP_LINE\n");
}

#[test]
fn test_config_set_without_file_fails() {
    let dir = TempDir::new().unwrap();
    buildstrip(&dir)
        .args(["config", "set", "useSpacing", "false"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config init"));
}

#[test]
fn test_config_show_json() {
    let dir = TempDir::new().unwrap();
    let output = buildstrip(&dir)
        .args(["config", "show", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["markers"]["lineMarker"], "BUILD_REMOVE");
}

#[test]
fn test_completions_bash() {
    let dir = TempDir::new().unwrap();
    buildstrip(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("buildstrip"));
}
