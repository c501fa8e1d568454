use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Contract tests for `vup show`

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
fn test_show_segments() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("VERSION"), "v1.2.3\n").unwrap();

    vup(&temp_dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Version Updater"))
        .stdout(predicate::str::contains("major"))
        .stdout(predicate::str::contains("minor"))
        .stdout(predicate::str::contains("patch"))
        .stdout(predicate::str::contains("Version in settings: v1.2.3"))
        .stdout(predicate::str::contains("Version v1.2.3 already in settings"));
}

#[test]
fn test_show_json() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("VERSION"), "2.0.0-rc\n").unwrap();

    let output = vup(&temp_dir).args(["show", "--json"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"], "parsed");
    assert_eq!(json["composed"], "2.0.0-rc");
    assert_eq!(json["dirty"], false);
    assert_eq!(json["segments"][0]["can_decrement"], true);
    assert_eq!(json["segments"][2]["can_decrement"], false);
}

#[test]
fn test_show_unsupported_version_is_not_fatal() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("VERSION"), "abc\n").unwrap();

    vup(&temp_dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("abc does not match regex"));
}

#[test]
fn test_show_without_settings_file() {
    let temp_dir = TempDir::new().unwrap();

    vup(&temp_dir)
        .arg("show")
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("No settings file found"));
}
