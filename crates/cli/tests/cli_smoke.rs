//! CLI smoke tests for nativeplan.
//!
//! These tests run the binary against small project files with a fixed
//! toolchain version, so no native-image installation is needed.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

const ORACLE_24: &str = "native-image 24.0.1 2025-04-15\nGraalVM Runtime Environment Oracle GraalVM 24.0.1+9.1";
const COMMUNITY_24: &str = "native-image 24.0.1 2025-04-15\nGraalVM Runtime Environment GraalVM CE 24.0.1+9.1";

/// Get a Command for the nativeplan binary.
fn nativeplan_cmd() -> Command {
  cargo_bin_cmd!("nativeplan")
}

/// Create a temp directory with a project file.
fn temp_project(content: &str) -> TempDir {
  let temp = TempDir::new().unwrap();
  std::fs::write(temp.path().join("project.json"), content).unwrap();
  temp
}

/// Project whose jar plugin declares the main class through a property.
const JAR_PROJECT: &str = r#"{
  "groupId": "com.example",
  "artifactId": "cli",
  "version": "1.0.0",
  "properties": {"app.main": "com.example.cli.Main"},
  "buildSteps": [
    {
      "key": "org.apache.maven.plugins:maven-jar-plugin",
      "configuration": {"archive": {"manifest": {"mainClass": "${app.main}"}}}
    }
  ]
}"#;

const POM_PROJECT: &str = r#"{"groupId": "com.example", "artifactId": "parent", "packaging": "pom"}"#;

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_works() {
  nativeplan_cmd()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage"));
}

#[test]
fn version_flag_works() {
  nativeplan_cmd()
    .arg("--version")
    .assert()
    .success()
    .stdout(predicate::str::contains("nativeplan"));
}

#[test]
fn subcommand_help_works() {
  for cmd in &["resolve", "probe"] {
    nativeplan_cmd()
      .arg(cmd)
      .arg("--help")
      .assert()
      .success()
      .stdout(predicate::str::contains("Usage"));
  }
}

// =============================================================================
// resolve
// =============================================================================

#[test]
fn resolve_discovers_main_class() {
  let temp = temp_project(JAR_PROJECT);

  nativeplan_cmd()
    .arg("resolve")
    .arg(temp.path().join("project.json"))
    .args(["--version-output", ORACLE_24])
    .args(["--build-arg", "--no-fallback"])
    .assert()
    .success()
    .stdout(predicate::str::contains("com.example.cli.Main"))
    .stdout(predicate::str::contains("--no-fallback"))
    .stdout(predicate::str::contains("not requested"));
}

#[test]
fn resolve_user_property_overrides_project() {
  let temp = temp_project(JAR_PROJECT);

  nativeplan_cmd()
    .arg("resolve")
    .arg(temp.path().join("project.json"))
    .args(["--version-output", ORACLE_24])
    .arg("-Dapp.main=com.example.cli.Other")
    .assert()
    .success()
    .stdout(predicate::str::contains("com.example.cli.Other"));
}

#[test]
fn resolve_json_output() {
  let temp = temp_project(JAR_PROJECT);

  let output = nativeplan_cmd()
    .args(["--output", "json", "resolve"])
    .arg(temp.path().join("project.json"))
    .args(["--version-output", ORACLE_24, "--augmented-sbom", "true"])
    .output()
    .unwrap();
  assert!(output.status.success());

  let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(plan["status"], "resolved");
  assert_eq!(plan["mainClass"], "com.example.cli.Main");
  assert_eq!(plan["arguments"], serde_json::json!(["--enable-sbom"]));
  assert_eq!(plan["sbomGenerationRequested"], true);
}

#[test]
fn resolve_explicit_sbom_on_community_fails() {
  let temp = temp_project(JAR_PROJECT);

  nativeplan_cmd()
    .arg("resolve")
    .arg(temp.path().join("project.json"))
    .args(["--version-output", COMMUNITY_24, "--augmented-sbom", "true"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("augmentedSBOM"))
    .stderr(predicate::str::contains("Oracle GraalVM"));
}

#[test]
fn resolve_raw_sbom_flag_on_community_succeeds() {
  let temp = temp_project(JAR_PROJECT);

  nativeplan_cmd()
    .arg("resolve")
    .arg(temp.path().join("project.json"))
    .args(["--version-output", COMMUNITY_24, "--build-arg", "--enable-sbom"])
    .assert()
    .success()
    .stdout(predicate::str::contains("not requested"));
}

#[test]
fn resolve_skips_pom_project() {
  let temp = temp_project(POM_PROJECT);

  nativeplan_cmd()
    .arg("resolve")
    .arg(temp.path().join("project.json"))
    .args(["--version-output", ORACLE_24, "--skip-for-pom"])
    .assert()
    .success()
    .stdout(predicate::str::contains("skipNativeBuildForPom"));
}

#[test]
fn resolve_nonexistent_project_fails() {
  nativeplan_cmd()
    .arg("resolve")
    .arg("/nonexistent/path/project.json")
    .args(["--version-output", ORACLE_24])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to read project"));
}

#[test]
fn resolve_malformed_project_fails() {
  let temp = temp_project("{ not json");

  nativeplan_cmd()
    .arg("resolve")
    .arg(temp.path().join("project.json"))
    .args(["--version-output", ORACLE_24])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to parse project"));
}

// =============================================================================
// toolchain
// =============================================================================

#[test]
fn toolchain_reports_edition_and_version() {
  nativeplan_cmd()
    .arg("probe")
    .args(["--version-output", ORACLE_24])
    .assert()
    .success()
    .stdout(predicate::str::contains("Oracle GraalVM"))
    .stdout(predicate::str::contains("24"))
    .stdout(predicate::str::contains("Augmented SBOM: supported"));
}

#[test]
fn community_toolchain_reports_sbom_unsupported() {
  nativeplan_cmd()
    .arg("probe")
    .args(["--version-output", COMMUNITY_24])
    .assert()
    .success()
    .stdout(predicate::str::contains("Augmented SBOM: unsupported"));
}

#[test]
fn missing_tool_falls_back_to_least_capable() {
  nativeplan_cmd()
    .args(["--output", "json", "probe"])
    .args(["--native-image", "/nonexistent/bin/native-image"])
    .assert()
    .success()
    .stdout(predicate::str::contains("\"community\""))
    .stdout(predicate::str::contains("\"major_version\": 0"));
}

/// Install a fake `bin/native-image` under `home` that prints `output`.
#[cfg(unix)]
fn fake_graalvm_home(home: &std::path::Path, output: &str) {
  use std::os::unix::fs::PermissionsExt;

  let bin = home.join("bin");
  std::fs::create_dir_all(&bin).unwrap();
  let launcher = bin.join("native-image");
  std::fs::write(&launcher, format!("#!/bin/sh\ncat <<'EOF'\n{}\nEOF\n", output)).unwrap();
  std::fs::set_permissions(&launcher, std::fs::Permissions::from_mode(0o755)).unwrap();
}

#[cfg(unix)]
#[test]
fn graalvm_home_launcher_is_used() {
  let temp = TempDir::new().unwrap();
  fake_graalvm_home(temp.path(), ORACLE_24);

  nativeplan_cmd()
    .args(["--output", "json", "probe"])
    .env("GRAALVM_HOME", temp.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("\"oracle\""))
    .stdout(predicate::str::contains("\"major_version\": 24"));
}

#[cfg(unix)]
#[test]
fn explicit_native_image_wins_over_graalvm_home() {
  let temp = TempDir::new().unwrap();
  fake_graalvm_home(temp.path(), ORACLE_24);

  nativeplan_cmd()
    .args(["--output", "json", "probe"])
    .args(["--native-image", "/nonexistent/bin/native-image"])
    .env("GRAALVM_HOME", temp.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("\"major_version\": 0"));
}
