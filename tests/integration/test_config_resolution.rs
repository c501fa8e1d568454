use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// End-to-end: vup.toml, user config and environment overrides

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
fn test_project_config_selects_file_and_names() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("meta")).unwrap();
    fs::write(temp_dir.path().join("meta/release.txt"), "2024.3\n").unwrap();
    fs::write(
        temp_dir.path().join("vup.toml"),
        "[settings]\nfile = \"meta/release.txt\"\nformat = \"plain\"\n\n[segments]\nnames = [\"year\", \"drop\"]\n",
    )
    .unwrap();

    vup(&temp_dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("year"))
        .stdout(predicate::str::contains("drop"));

    vup(&temp_dir).args(["bump", "1"]).assert().success();
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("meta/release.txt")).unwrap(),
        "2024.4\n"
    );
}

#[test]
fn test_env_file_overrides_config() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("VERSION"), "1.0\n").unwrap();
    fs::write(temp_dir.path().join("OTHER"), "5.0\n").unwrap();

    vup(&temp_dir)
        .env("VUP_FILE", "OTHER")
        .args(["bump", "0"])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(temp_dir.path().join("OTHER")).unwrap(), "6.0\n");
    assert_eq!(fs::read_to_string(temp_dir.path().join("VERSION")).unwrap(), "1.0\n");
}

#[test]
fn test_user_config_applies() {
    let temp_dir = TempDir::new().unwrap();
    let user_dir = temp_dir.path().join(".config").join("vup");
    fs::create_dir_all(&user_dir).unwrap();
    fs::write(
        user_dir.join("config.toml"),
        "[segments]\nnames = [\"epoch\"]\n",
    )
    .unwrap();
    fs::write(temp_dir.path().join("VERSION"), "3.1\n").unwrap();

    vup(&temp_dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("epoch"));
}

#[test]
fn test_invalid_config_reported() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("VERSION"), "1.0\n").unwrap();
    fs::write(temp_dir.path().join("vup.toml"), "[settings]\nunknown = 1\n").unwrap();

    vup(&temp_dir)
        .arg("show")
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}
