//! Integration tests for the Gangway CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn gangway(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("gangway").unwrap();
    cmd.current_dir(dir.path());
    cmd
}

/// Test CLI binary exists and responds to --help
#[test]
fn test_cli_help() {
    let temp_dir = TempDir::new().unwrap();
    gangway(&temp_dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("entrypoint"));
}

/// Test CLI responds to --version
#[test]
fn test_cli_version() {
    let temp_dir = TempDir::new().unwrap();
    gangway(&temp_dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gangway"));
}

/// No command is a misconfigured container: message plus exit 1
#[test]
fn test_no_command_is_a_usage_error() {
    let temp_dir = TempDir::new().unwrap();
    gangway(&temp_dir)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot start"))
        // The banner still precedes the failure
        .stdout(predicate::str::contains("release"));
}

/// Unrecognized commands run verbatim, banner first
#[test]
fn test_passthrough_runs_verbatim() {
    let temp_dir = TempDir::new().unwrap();
    gangway(&temp_dir)
        .args(["echo", "hi"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"(?s)release.*hi").unwrap())
        .stdout(predicate::function(|out: &str| {
            out.matches("release").count() == 1
        }));
}

/// A passthrough command's exit code is the dispatcher's exit code
#[cfg(unix)]
#[test]
fn test_passthrough_propagates_exit_code() {
    let temp_dir = TempDir::new().unwrap();
    gangway(&temp_dir)
        .args(["sh", "-c", "exit 7"])
        .assert()
        .failure()
        .code(7);
}

/// A passthrough program that does not exist fails clearly
#[test]
fn test_passthrough_unknown_program() {
    let temp_dir = TempDir::new().unwrap();
    gangway(&temp_dir)
        .arg("gangway-no-such-program")
        .assert()
        .failure()
        .stderr(predicate::str::contains("command not found"));
}

/// The banner shows the labels from the environment
#[test]
fn test_banner_labels_from_env() {
    let temp_dir = TempDir::new().unwrap();
    gangway(&temp_dir)
        .env("GANGWAY_DEPLOY_VERSION", "9.9.9")
        .env("GANGWAY_DEPLOY_CONTEXT", "integration")
        .args(["echo", "ok"])
        .assert()
        .success()
        .stdout(predicate::str::contains("9.9.9"))
        .stdout(predicate::str::contains("integration"));
}

/// Environment overrides beat the config file
#[test]
fn test_env_overrides_config_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("gangway.toml"),
        "[deploy]\nversion = \"1.0.0\"\n",
    )
    .unwrap();

    gangway(&temp_dir)
        .env("GANGWAY_DEPLOY_VERSION", "2.0.0")
        .args(["echo", "ok"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2.0.0"))
        .stdout(predicate::str::contains("1.0.0").not());
}

/// An explicitly requested config file must exist
#[test]
fn test_missing_explicit_config_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    gangway(&temp_dir)
        .args(["--config", "/definitely/not/here.toml", "start"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration"));
}

/// `start` hands the process over to the configured entry point
#[test]
fn test_start_runs_the_entry_point() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("gangway.toml"),
        "[service]\nentry = [\"echo\", \"service-is-up\"]\n",
    )
    .unwrap();

    gangway(&temp_dir)
        .arg("start")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"(?s)release.*service-is-up").unwrap());
}

/// `start` without a configured entry point is a clear error
#[test]
fn test_start_requires_an_entry_point() {
    let temp_dir = TempDir::new().unwrap();
    gangway(&temp_dir)
        .arg("start")
        .assert()
        .failure()
        .stderr(predicate::str::contains("service.entry"));
}

/// `develop` needs the same entry point configuration
#[test]
fn test_develop_requires_an_entry_point() {
    let temp_dir = TempDir::new().unwrap();
    gangway(&temp_dir)
        .arg("develop")
        .assert()
        .failure()
        .stderr(predicate::str::contains("service.entry"));
}

/// `selfcheck` exits with the test runner's own code
#[cfg(unix)]
#[test]
fn test_selfcheck_propagates_failure_code() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("gangway.toml"),
        "[selfcheck]\ncommand = [\"sh\", \"-c\", \"exit 3\"]\n",
    )
    .unwrap();

    gangway(&temp_dir)
        .arg("selfcheck")
        .assert()
        .failure()
        .code(3);
}

/// A passing selfcheck reports success and exits zero
#[cfg(unix)]
#[test]
fn test_selfcheck_passes() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("gangway.toml"),
        "[selfcheck]\ncommand = [\"true\"]\n",
    )
    .unwrap();

    gangway(&temp_dir)
        .arg("selfcheck")
        .assert()
        .success()
        .stdout(predicate::str::contains("selfcheck passed"));
}

/// `selfcheck` without a configured runner is a clear error
#[test]
fn test_selfcheck_requires_a_command() {
    let temp_dir = TempDir::new().unwrap();
    gangway(&temp_dir)
        .arg("selfcheck")
        .assert()
        .failure()
        .stderr(predicate::str::contains("selfcheck.command"));
}

/// `shell` starts in the service source directory
#[cfg(unix)]
#[test]
fn test_shell_opens_in_service_dir() {
    let temp_dir = TempDir::new().unwrap();
    let src_dir = temp_dir.path().join("srcdir");
    fs::create_dir(&src_dir).unwrap();
    fs::write(
        temp_dir.path().join("gangway.toml"),
        format!(
            "[service]\ndir = \"{}\"\nshell = \"sh\"\n",
            src_dir.display()
        ),
    )
    .unwrap();

    gangway(&temp_dir)
        .arg("shell")
        .write_stdin("pwd\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("srcdir"));
}
