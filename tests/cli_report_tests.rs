//! Integration tests for non-interactive `--report` output and startup options
#![allow(deprecated)] // suppress assert_cmd::Command::cargo_bin deprecation in tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn rollbook(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("rollbook").unwrap();
    cmd.current_dir(dir.path());
    cmd
}

fn write_roster(dir: &TempDir, name: &str, contents: &str) {
    fs::write(dir.path().join(name), contents).unwrap();
}

#[test]
fn test_report_text_sorted_by_percentage() {
    let dir = TempDir::new().unwrap();
    write_roster(&dir, "students.csv", "Bea,2,50,100\nAl,1,80,100\n");

    let output = rollbook(&dir).arg("--report").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    let al = stdout.find("Name: Al").unwrap();
    let bea = stdout.find("Name: Bea").unwrap();
    assert!(al < bea);
    assert!(stdout.contains("Result: Passing"));
    assert!(stdout.contains("Result: Failing"));
}

#[test]
fn test_report_missing_file_is_empty() {
    let dir = TempDir::new().unwrap();
    rollbook(&dir)
        .args(["--report", "--format", "csv"])
        .assert()
        .success()
        .stdout("name,roll,attendance,total,percentage,result\n");
}

#[test]
fn test_report_json_uses_named_file() {
    let dir = TempDir::new().unwrap();
    write_roster(&dir, "class-b.csv", "Ana,1,3,4,10th\n");

    let output = rollbook(&dir)
        .args(["class-b.csv", "--report", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["summary"]["students"], 1);
    assert_eq!(json["students"][0]["percentage"], 75.0);
    assert_eq!(json["students"][0]["passing"], true);
    assert_eq!(json["students"][0]["role"]["grade_level"], "10th");
}

#[test]
fn test_threshold_flag_changes_result() {
    let dir = TempDir::new().unwrap();
    write_roster(&dir, "students.csv", "Bea,2,50,100\n");

    rollbook(&dir)
        .args(["--report", "--format", "csv", "--threshold", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bea,2,50,100,50.00,Passing"));
}

#[test]
fn test_threshold_flag_out_of_range_fails() {
    let dir = TempDir::new().unwrap();
    rollbook(&dir)
        .args(["--report", "--threshold", "150"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value for --threshold"));
}

#[test]
fn test_malformed_lines_skipped_with_warning() {
    let dir = TempDir::new().unwrap();
    write_roster(&dir, "students.csv", "Ana,1,1,1\nBen,notanumber,1,1\n");

    rollbook(&dir)
        .args(["--report", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ana,1,1,1"))
        .stdout(predicate::str::contains("Ben").not())
        .stderr(predicate::str::contains("skipped line 2"));
}

#[test]
fn test_strict_rejects_malformed_file() {
    let dir = TempDir::new().unwrap();
    write_roster(&dir, "students.csv", "Ana,1,1,1\nBen,notanumber,1,1\n");

    rollbook(&dir)
        .args(["--report", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed line"));
}

#[test]
fn test_config_file_supplies_defaults() {
    let dir = TempDir::new().unwrap();
    write_roster(&dir, "class-a.csv", "Bea,2,60,100\n");
    fs::write(
        dir.path().join("rollbook.toml"),
        "default_file = \"class-a.csv\"\nthreshold = 60.0\n",
    )
    .unwrap();

    rollbook(&dir)
        .args(["--report", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bea,2,60,100,60.00,Passing"));
}

#[test]
fn test_cli_threshold_overrides_config() {
    let dir = TempDir::new().unwrap();
    write_roster(&dir, "students.csv", "Bea,2,60,100\n");
    fs::write(dir.path().join("custom.toml"), "threshold = 60.0\n").unwrap();

    rollbook(&dir)
        .args(["--config", "custom.toml", "-t", "90", "--report", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bea,2,60,100,60.00,Failing"));
}

#[test]
fn test_bad_config_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("rollbook.toml"), "threshold = \"high\"\n").unwrap();

    rollbook(&dir)
        .arg("--report")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));
}

#[test]
fn test_non_utf8_line_skipped_with_warning() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("students.csv"), b"Ana,1,1,1\nJos\xe9,2,1,1\n").unwrap();

    rollbook(&dir)
        .args(["--report", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ana,1,1,1,100.00,Passing"))
        .stderr(predicate::str::contains("skipped line 2: invalid UTF-8"));

    rollbook(&dir)
        .args(["--report", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid UTF-8"));
}
