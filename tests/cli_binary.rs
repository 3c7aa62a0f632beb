//! Runs the real binary against a shell stub standing in for the client.

#![cfg(unix)]

use std::error::Error;
use std::path::Path;
use std::process::{Command, Output};

type TestResult = Result<(), Box<dyn Error>>;

fn write_config(dir: &Path, program: &str) -> std::io::Result<std::path::PathBuf> {
    let path = dir.join("sfdeploy.toml");
    std::fs::write(
        &path,
        format!("[client]\nprogram = \"{program}\"\npoll_interval_ms = 10\n"),
    )?;
    Ok(path)
}

fn sfdeploy(dir: &Path, config: &Path, args: &[&str]) -> std::io::Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_sfdeploy"))
        .current_dir(dir)
        .arg("--config")
        .arg(config)
        .args(["-l", "deploy_log.txt"])
        .args(args)
        .env_remove("SFDEPLOY_LOG")
        .output()
}

#[test]
fn failing_client_exits_with_status_one() -> TestResult {
    let dir = tempfile::tempdir()?;
    // `false #` turns every generated command into a failing no-op.
    let config = write_config(dir.path(), "false #")?;

    let out = sfdeploy(dir.path(), &config, &["-t", "ApexTest1"])?;

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("command failed"));
    Ok(())
}

#[test]
fn push_validation_without_tests_runs_nothing() -> TestResult {
    let dir = tempfile::tempdir()?;
    let config = write_config(dir.path(), "false #")?;

    let out = sfdeploy(dir.path(), &config, &["-v", "-p", "push"])?;

    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Not running a validation"));
    assert!(!dir.path().join("deploy_log.txt").exists());
    Ok(())
}

#[test]
fn dry_run_prints_command_on_stdout() -> TestResult {
    let dir = tempfile::tempdir()?;
    let config = write_config(dir.path(), "false #")?;

    let out = sfdeploy(
        dir.path(),
        &config,
        &["-d", "-v", "-t", "ApexTest1,ApexTest2", "-w", "10", "-p", "merge-request"],
    )?;

    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(
        stdout.trim(),
        "false # project deploy validate -x manifest/package.xml -l RunSpecifiedTests \
         -t ApexTest1,ApexTest2 -w 10 --verbose"
    );
    Ok(())
}

#[test]
fn validation_is_followed_by_quick_deploy() -> TestResult {
    let dir = tempfile::tempdir()?;
    let config = write_config(
        dir.path(),
        "echo 'Deploy ID: 0Af5g00000ABCDEFGH'; echo 'Deploy ID: 0Af5g00000ZZZZZZZZ'; sleep 1; true #",
    )?;

    let out = sfdeploy(
        dir.path(),
        &config,
        &["-v", "-t", "ApexTest1", "-w", "10", "-e", "https://org.my.salesforce.com"],
    )?;

    assert_eq!(out.status.code(), Some(0));

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains(
        "https://org.my.salesforce.com/changemgmt/monitorDeploymentsDetails.apexp\
         ?retURL=/changemgmt/monitorDeployment.apexp&asyncId=0Af5g00000ABCDE"
    ));
    // Only the first marker produces a link; the later one is ignored.
    assert_eq!(stderr.matches("asyncId=0Af5g00000ABCDE").count(), 1);
    assert!(!stderr.contains("asyncId=0Af5g00000ZZZZZ"));
    assert!(stderr.contains("project deploy quick -i 0Af5g00000ABCDEFGH -w 10"));

    let log = std::fs::read_to_string(dir.path().join("deploy_log.txt"))?;
    assert_eq!(log.matches("Deploy ID: 0Af5g00000ABCDEFGH").count(), 2);
    Ok(())
}

#[test]
fn missing_deploy_id_fails_the_quick_deploy() -> TestResult {
    let dir = tempfile::tempdir()?;
    let config = write_config(dir.path(), "echo 'No changes to deploy'; true #")?;

    let out = sfdeploy(dir.path(), &config, &["-v", "-t", "ApexTest1"])?;

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("no Deploy ID was captured"));
    Ok(())
}
