//! Integration tests for the rigup binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn rigup() -> Command {
    let mut cmd = Command::new(cargo_bin("rigup"));
    cmd.env("SHELL", "/bin/sh")
        .env("NO_COLOR", "1")
        .env_remove("RIGUP_RESOURCE_GROUP")
        .env_remove("RIGUP_LOCATION")
        .env_remove("RIGUP_ENVIRONMENT_TAG");
    cmd
}

fn write_plan(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("plan.yml");
    fs::write(&path, content).unwrap();
    path
}

/// A plan that "creates" a directory per resource group, like a real
/// create call that refuses to overwrite.
fn mkdir_plan(root: &Path) -> String {
    format!(
        r#"
name: Directory lab
steps:
  - name: Create group
    commands:
      - mkdir {root}/${{resource_group}}
  - name: Create network
    commands:
      - mkdir {root}/${{resource_group}}/vnet
    captures:
      - name: vnet_path
        command: echo {root}/${{resource_group}}/vnet
  - name: Tag group
    commands:
      - echo ${{environment_tag}} > ${{vnet_path}}/tag
facts:
  - key: tag
    label: Environment tag
    command: cat {root}/${{resource_group}}/vnet/tag
  - key: region
    label: Location seen
    command: echo ${{location}}
  - key: entries
    label: Entries
    command: ls {root}/${{resource_group}} | wc -l | tr -d ' '
checks:
  - title: Tag was not written
    fact: tag
    expected: ${{environment_tag}}
cleanup:
  - rm -rf {root}/${{resource_group}}
"#,
        root = root.display()
    )
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    rigup()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fail-fast"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    rigup()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_rejects_unknown_flag() -> Result<(), Box<dyn std::error::Error>> {
    rigup().args(["run", "--bogus"]).assert().code(2);
    Ok(())
}

#[test]
fn steps_lists_builtin_plan_with_defaults() -> Result<(), Box<dyn std::error::Error>> {
    rigup()
        .args(["steps", "--verbose"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Create resource group"))
        .stdout(predicate::str::contains("--name rg-hubspoke-lab --location eastus"))
        .stdout(predicate::str::contains("environment=training"));
    Ok(())
}

#[test]
fn steps_reads_parameters_from_env() -> Result<(), Box<dyn std::error::Error>> {
    rigup()
        .args(["steps", "-v"])
        .env("RIGUP_LOCATION", "westeurope")
        .assert()
        .success()
        .stdout(predicate::str::contains("--location westeurope"));
    Ok(())
}

#[test]
fn run_succeeds_and_prints_report() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let plan = write_plan(temp.path(), &mkdir_plan(temp.path()));

    rigup()
        .args(["run", "--plan"])
        .arg(&plan)
        .args(["-g", "rg-one", "-t", "lab"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Create group completed in"))
        .stdout(predicate::str::contains("Tag group completed in"))
        .stdout(predicate::str::contains("Facts gathered in"))
        .stdout(predicate::str::contains("Gathering facts completed in").not())
        .stdout(predicate::str::contains("Environment tag"))
        .stdout(predicate::str::contains("No known issues detected"));

    assert_eq!(fs::read_to_string(temp.path().join("rg-one/vnet/tag"))?.trim(), "lab");
    Ok(())
}

#[test]
fn failing_step_stops_the_run() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let marker = temp.path().join("third-ran");
    let plan = write_plan(
        temp.path(),
        &format!(
            r#"
steps:
  - name: First
    commands: ["echo one"]
  - name: Second
    commands: ["echo partial output && exit 3"]
  - name: Third
    commands: ["touch {}"]
"#,
            marker.display()
        ),
    );

    rigup()
        .args(["run", "--plan"])
        .arg(&plan)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("First completed in"))
        .stderr(predicate::str::contains("Step 'Second' failed"))
        .stderr(predicate::str::contains("partial output"))
        .stderr(predicate::str::contains("rigup cleanup"));

    assert!(!marker.exists());
    Ok(())
}

#[test]
fn second_run_fails_until_cleanup() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let plan = write_plan(temp.path(), &mkdir_plan(temp.path()));
    let run = |group: &str| {
        let mut cmd = rigup();
        cmd.args(["run", "--plan"]).arg(&plan).args(["-g", group]);
        cmd
    };

    run("rg-twice").assert().success();
    run("rg-twice")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Step 'Create group' failed"));

    // A fresh group is unaffected.
    run("rg-other").assert().success();

    rigup()
        .args(["cleanup", "--plan"])
        .arg(&plan)
        .args(["-g", "rg-twice"])
        .assert()
        .success();
    assert!(!temp.path().join("rg-twice").exists());

    run("rg-twice").assert().success();
    Ok(())
}

#[test]
fn missing_plan_file_fails() -> Result<(), Box<dyn std::error::Error>> {
    rigup()
        .args(["run", "--plan", "/nonexistent/plan.yml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Plan not found"));
    Ok(())
}

#[test]
fn invalid_plan_is_rejected_before_running() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let marker = temp.path().join("ran");
    let plan = write_plan(
        temp.path(),
        &format!(
            r#"
steps:
  - name: Touch
    commands: ["touch {} ${{undefined_fact}}"]
"#,
            marker.display()
        ),
    );

    rigup()
        .args(["run", "--plan"])
        .arg(&plan)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("undefined_fact"));

    assert!(!marker.exists());
    Ok(())
}

#[test]
fn completions_generate_script() -> Result<(), Box<dyn std::error::Error>> {
    rigup()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rigup"));
    Ok(())
}
