// Binary-level tests for the create-turbo command line

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn create_turbo() -> Command {
    let mut cmd = Command::cargo_bin("create-turbo").unwrap();
    cmd.env("CREATE_TURBO_NO_UPDATE_CHECK", "1")
        .env("NO_COLOR", "1")
        .env_remove("npm_config_user_agent");
    cmd
}

/// Install a fake `npm` executable into `bin_dir`
#[cfg(unix)]
fn fake_npm(bin_dir: &Path, install_exit_code: i32) {
    use std::os::unix::fs::PermissionsExt;

    let script = format!(
        "#!/bin/sh\nif [ \"$1\" = \"--version\" ]; then echo 10.2.0; exit 0; fi\nexit {install_exit_code}\n"
    );
    let path = bin_dir.join("npm");
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

#[test]
fn test_help_short_circuits() {
    for flag in ["--help", "-h"] {
        create_turbo()
            .args([flag, "--definitely-unknown"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "create-turbo <project-directory> <package-manager> [options]",
            ))
            .stdout(predicate::str::contains("--skip-install"))
            .stdout(predicate::str::contains("--example-path"))
            .stdout(predicate::str::contains("A new version").not());
    }
}

#[test]
fn test_version_short_circuits() {
    for flag in ["--version", "-v"] {
        create_turbo()
            .args(["some-dir", flag])
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}

#[test]
fn test_unknown_flag_is_usage_error() {
    create_turbo()
        .arg("--nope")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--nope"))
        .stderr(predicate::str::contains("Unexpected error").not());
}

#[test]
fn test_missing_option_value_is_usage_error() {
    create_turbo().arg("--turbo-version").assert().code(2);
}

#[test]
fn test_help_wins_over_earlier_usage_errors() {
    for args in [["--bogus", "--help"], ["--turbo-version", "-h"]] {
        create_turbo()
            .args(args)
            .assert()
            .success()
            .stdout(predicate::str::contains("--skip-transforms"))
            .stderr(predicate::str::is_empty());
    }
}

#[test]
fn test_version_wins_over_earlier_usage_errors() {
    for args in [["--bogus", "-v"], ["--turbo-version", "--version"]] {
        create_turbo()
            .args(args)
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}

#[test]
fn test_boolean_flags_accept_attached_values() {
    let temp_dir = TempDir::new().unwrap();

    create_turbo()
        .current_dir(temp_dir.path())
        .args(["new-repo", "pnpm", "--skip-install=false", "--skip-transforms=x"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Success!"));

    assert!(temp_dir.path().join("new-repo").is_dir());
}

#[test]
fn test_invalid_environment_is_unexpected_failure() {
    let temp_dir = TempDir::new().unwrap();

    create_turbo()
        .current_dir(temp_dir.path())
        .env("CREATE_TURBO_REGISTRY", "ftp://registry.example.com")
        .args(["new-repo", "pnpm", "--skip-install"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Unexpected error. Please report it as a bug:",
        ))
        .stderr(predicate::str::contains("Registry URL must use http or https"));

    assert!(!temp_dir.path().join("new-repo").exists());
}

#[test]
fn test_success_creates_directory() {
    let temp_dir = TempDir::new().unwrap();

    create_turbo()
        .current_dir(temp_dir.path())
        .args(["new-repo", "pnpm", "--skip-install", "--skip-transforms"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Success!"))
        .stdout(predicate::str::contains("new-repo"));

    assert!(temp_dir.path().join("new-repo").is_dir());
}

#[test]
fn test_invalid_package_manager_is_unexpected_failure() {
    let temp_dir = TempDir::new().unwrap();

    create_turbo()
        .current_dir(temp_dir.path())
        .args(["new-repo", "pip"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Unexpected error. Please report it as a bug:",
        ))
        .stderr(predicate::str::contains("Invalid package manager: pip"));
}

#[test]
fn test_invalid_example_url_is_unexpected_failure() {
    let temp_dir = TempDir::new().unwrap();

    create_turbo()
        .current_dir(temp_dir.path())
        .args(["new-repo", "--example", "https://gitlab.com/acme/starter"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Only GitHub repositories are supported"));
}

#[cfg(unix)]
#[test]
fn test_failed_install_is_reported_by_command_name() {
    let temp_dir = TempDir::new().unwrap();
    let bin_dir = temp_dir.path().join("bin");
    let project = temp_dir.path().join("acme");
    fs::create_dir_all(&bin_dir).unwrap();
    fs::create_dir_all(&project).unwrap();
    fs::write(project.join("package.json"), r#"{"name":"acme"}"#).unwrap();
    fake_npm(&bin_dir, 1);

    create_turbo()
        .current_dir(temp_dir.path())
        .env("PATH", &bin_dir)
        .args(["acme", "npm", "--skip-transforms"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("npm install has failed."))
        .stderr(predicate::str::contains("Unexpected error").not());
}

#[cfg(unix)]
#[test]
fn test_install_and_transforms_run_in_project() {
    let temp_dir = TempDir::new().unwrap();
    let bin_dir = temp_dir.path().join("bin");
    let project = temp_dir.path().join("acme");
    fs::create_dir_all(&bin_dir).unwrap();
    fs::create_dir_all(&project).unwrap();
    fs::write(
        project.join("package.json"),
        r#"{"name":"acme","devDependencies":{"turbo":"latest"}}"#,
    )
    .unwrap();
    fake_npm(&bin_dir, 0);

    create_turbo()
        .current_dir(temp_dir.path())
        .env("PATH", &bin_dir)
        .args(["acme", "npm", "--turbo-version", "1.10.16"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Success!"));

    let package_json = fs::read_to_string(project.join("package.json")).unwrap();
    assert!(package_json.contains(r#""packageManager": "npm@10.2.0""#));
    assert!(package_json.contains(r#""turbo": "1.10.16""#));
}
