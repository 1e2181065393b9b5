//! Integration tests for the command-line surface

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cli(home: &TempDir) -> Result<Command> {
    let mut cmd = Command::cargo_bin("linear-kanban-mcp")?;
    cmd.env_remove("LINEAR_API_KEY")
        .env_remove("LINEAR_KANBAN_API_URL")
        .env_remove("LINEAR_KANBAN_LOG_FILE")
        .env("HOME", home.path())
        .current_dir(home.path());
    Ok(cmd)
}

#[test]
fn test_help_lists_subcommands() -> Result<()> {
    let home = TempDir::new()?;
    cli(&home)?
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("doctor"))
        .stdout(predicate::str::contains("test-milestone"));
    Ok(())
}

#[test]
fn test_version() -> Result<()> {
    let home = TempDir::new()?;
    cli(&home)?
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn test_doctor_without_api_key_fails_fast() -> Result<()> {
    let home = TempDir::new()?;
    cli(&home)?
        .arg("doctor")
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "LINEAR_API_KEY environment variable is required",
        ))
        .stdout(predicate::str::contains("Running diagnostics").not());
    Ok(())
}

#[test]
fn test_test_milestone_without_api_key_fails_fast() -> Result<()> {
    let home = TempDir::new()?;
    cli(&home)?
        .args(["test-milestone", "--project", "roadmap"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "LINEAR_API_KEY environment variable is required",
        ))
        .stdout(predicate::str::contains("Searching").not());
    Ok(())
}

#[test]
fn test_unknown_subcommand_is_rejected() -> Result<()> {
    let home = TempDir::new()?;
    cli(&home)?
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("frobnicate"));
    Ok(())
}

#[test]
fn test_yaml_config_with_bad_url_still_runs() -> Result<()> {
    let home = TempDir::new()?;
    std::fs::write(
        home.path().join("linear-kanban.yaml"),
        "api_url: \"not a url\"\n",
    )?;

    cli(&home)?
        .arg("doctor")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("LINEAR_API_KEY"));
    Ok(())
}
