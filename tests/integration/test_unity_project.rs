use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// End-to-end: a Unity project whose version lives in PlayerSettings

const PROJECT_SETTINGS: &str = "%YAML 1.1
%TAG !u! tag:unity3d.com,2011:
--- !u!129 &1
PlayerSettings:
  m_ObjectHideFlags: 0
  serializedVersion: 26
  companyName: DefaultCompany
  productName: Demo
  bundleVersion: 0.4.2
  preloadedAssets: []
  metroPackageVersion: 1.0.0.0
";

fn unity_project() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let settings_dir = temp_dir.path().join("ProjectSettings");
    fs::create_dir_all(&settings_dir).unwrap();
    let asset = settings_dir.join("ProjectSettings.asset");
    fs::write(&asset, PROJECT_SETTINGS).unwrap();
    (temp_dir, asset)
}

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
fn test_unity_bump_rewrites_only_bundle_version() {
    let (temp_dir, asset) = unity_project();

    vup(&temp_dir)
        .args(["bump", "minor"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.4.2 -> 0.5.0"));

    let contents = fs::read_to_string(&asset).unwrap();
    assert_eq!(
        contents,
        PROJECT_SETTINGS.replace("bundleVersion: 0.4.2", "bundleVersion: 0.5.0")
    );
}

#[test]
fn test_unity_show_reports_format() {
    let (temp_dir, _asset) = unity_project();

    let output = vup(&temp_dir).args(["show", "--json"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["format"], "unity");
    assert_eq!(json["current"], "0.4.2");
}

#[test]
fn test_unity_missing_bundle_version() {
    let temp_dir = TempDir::new().unwrap();
    let settings_dir = temp_dir.path().join("ProjectSettings");
    fs::create_dir_all(&settings_dir).unwrap();
    fs::write(
        settings_dir.join("ProjectSettings.asset"),
        "PlayerSettings:\n  productName: Demo\n",
    )
    .unwrap();

    vup(&temp_dir)
        .arg("show")
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("No bundleVersion found"));
}

#[test]
fn test_explicit_file_and_format() {
    let temp_dir = TempDir::new().unwrap();
    let asset = temp_dir.path().join("PlayerSettings.yaml");
    fs::write(&asset, PROJECT_SETTINGS).unwrap();

    vup(&temp_dir)
        .args(["--file", "PlayerSettings.yaml", "--format", "unity", "bump", "patch"])
        .assert()
        .success();

    assert!(fs::read_to_string(&asset)
        .unwrap()
        .contains("bundleVersion: 0.4.3\n"));
}
