use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// End-to-end: versions stored in TOML manifests

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
fn test_cargo_manifest_keeps_comments() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = temp_dir.path().join("Cargo.toml");
    let original = r#"# Release tooling reads this file
[package]
name = "demo"
version = "0.3.9" # keep in sync with CHANGELOG
edition = "2021"

[dependencies]
serde = { version = "1.0", features = ["derive"] }
"#;
    fs::write(&manifest, original).unwrap();

    vup(&temp_dir)
        .args(["bump", "patch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.3.9 -> 0.3.10"));

    let updated = fs::read_to_string(&manifest).unwrap();
    assert_eq!(updated, original.replace("\"0.3.9\"", "\"0.3.10\""));
}

#[test]
fn test_project_toml_preferred_over_version_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("project.toml"),
        "[project]\nname = \"app\"\nversion = \"1.0.0\"\n",
    )
    .unwrap();
    fs::write(temp_dir.path().join("VERSION"), "9.9.9\n").unwrap();

    vup(&temp_dir).args(["bump", "major"]).assert().success();

    let project = fs::read_to_string(temp_dir.path().join("project.toml")).unwrap();
    assert!(project.contains("version = \"2.0.0\""));
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("VERSION")).unwrap(),
        "9.9.9\n"
    );
}

#[test]
fn test_manifest_without_version() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("Cargo.toml"),
        "[workspace]\nmembers = [\"a\"]\n",
    )
    .unwrap();

    vup(&temp_dir)
        .arg("show")
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("No version key found"));
}
