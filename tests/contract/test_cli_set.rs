use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Contract tests for `vup set`

fn vup(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("vup").unwrap();
    cmd.current_dir(temp_dir.path())
        .env("XDG_CONFIG_HOME", temp_dir.path().join(".config"))
        .env_remove("VUP_FILE")
        .env_remove("VUP_FORMAT")
        .env_remove("VUP_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_set_keeps_lower_segments() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("VERSION");
    fs::write(&path, "1.2.3\n").unwrap();

    vup(&temp_dir)
        .args(["set", "major", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.2.3 -> 4.2.3"));

    assert_eq!(fs::read_to_string(&path).unwrap(), "4.2.3\n");
}

#[test]
fn test_set_same_value_does_not_write() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("VERSION");
    // No trailing newline: a write would add one
    fs::write(&path, "1.2.3").unwrap();

    vup(&temp_dir)
        .args(["set", "2", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Version 1.2.3 already in"));

    assert_eq!(fs::read_to_string(&path).unwrap(), "1.2.3");
}

#[test]
fn test_set_rejects_negative_value() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("VERSION"), "1.2.3\n").unwrap();

    vup(&temp_dir).args(["set", "0", "-1"]).assert().failure().code(2);
}
