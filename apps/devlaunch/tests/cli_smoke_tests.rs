#![allow(clippy::unwrap_used, clippy::expect_used)]

//! CLI smoke tests for the launcher binaries
//!
//! These tests run the real binaries against the demo entry points and check
//! the forwarded arguments, exit status and the log lines on stderr.

use std::fs;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use devlaunch::config::RECOGNIZED_VARS;
use tempfile::TempDir;

/// Command with every recognized launcher variable cleared and info logging on.
fn launcher(bin: &str, env: &[(&str, &str)], args: &[&str]) -> Output {
    let mut cmd = Command::new(bin);
    for var in RECOGNIZED_VARS {
        cmd.env_remove(var);
    }
    cmd.env("RUST_LOG", "info")
        .envs(env.iter().copied())
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute launcher")
}

fn run_client(env: &[(&str, &str)], args: &[&str]) -> Output {
    launcher(env!("CARGO_BIN_EXE_devlaunch-client"), env, args)
}

fn run_server(env: &[(&str, &str)], args: &[&str]) -> Output {
    launcher(env!("CARGO_BIN_EXE_devlaunch-server"), env, args)
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// `arg: ...` lines printed by the echo entry point.
fn echoed_args(output: &Output) -> Vec<String> {
    stdout_of(output)
        .lines()
        .filter_map(|line| line.strip_prefix("arg: "))
        .map(str::to_owned)
        .collect()
}

#[test]
fn test_missing_main_class_fails() {
    let output = run_server(&[], &["nogui"]);

    assert!(!output.status.success(), "Launch without mainClass should fail");
    assert!(
        stderr_of(&output).contains("mainClass"),
        "Should name the missing variable: {}",
        stderr_of(&output)
    );
    assert!(stdout_of(&output).is_empty(), "No entry point should run");
}

#[test]
fn test_unknown_entry_point_fails() {
    let output = run_server(&[("mainClass", "demo.missing.Main")], &[]);

    assert!(!output.status.success(), "Unknown symbol should fail");
    assert!(stderr_of(&output).contains("demo.missing.Main"));
}

#[test]
fn test_server_forwards_arguments_verbatim() {
    let output = run_server(
        &[("mainClass", "demo.echo.Main")],
        &["--port", "25565", "nogui"],
    );

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(echoed_args(&output), vec!["--port", "25565", "nogui"]);
    assert!(stderr_of(&output).contains("Extra: [\"--port\", \"25565\", \"nogui\"]"));
}

#[test]
fn test_client_applies_defaults_and_redacts_token() {
    let output = run_client(
        &[
            ("mainClass", "demo.echo.Main"),
            ("MC_VERSION", "1.12.2"),
            ("tweakClass", "demo.Tweaker"),
        ],
        &["--username", "Dev", "--accessToken", "secret-token", "nogui"],
    );

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(
        echoed_args(&output),
        vec![
            "--version",
            "1.12.2",
            "--accessToken",
            "secret-token",
            "--userProperties",
            "{}",
            "--username",
            "Dev",
            "--tweakClass",
            "demo.Tweaker",
            "nogui",
        ]
    );

    let stderr = stderr_of(&output);
    assert!(stderr.contains("username: Dev"));
    assert!(stderr.contains("--accessToken, {REDACTED}"), "stderr: {stderr}");
    assert!(
        !stderr.contains("secret-token"),
        "Token must never reach the log: {stderr}"
    );
}

#[test]
fn test_double_dash_ends_option_parsing() {
    let output = run_client(
        &[("mainClass", "demo.echo.Main"), ("MC_VERSION", "1.12.2")],
        &["--", "--version", "9"],
    );

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(
        echoed_args(&output),
        vec![
            "--version",
            "1.12.2",
            "--accessToken",
            "FML",
            "--userProperties",
            "{}",
            "--version",
            "9",
        ]
    );
}

#[test]
fn test_exit_code_is_forwarded() {
    let output = run_server(&[("mainClass", "demo.echo.Main")], &["--exit-code", "7"]);

    assert_eq!(output.status.code(), Some(7));
}

#[test]
fn test_entry_point_error_fails_launch() {
    let output = run_server(&[("mainClass", "demo.fail.Main")], &["a", "b"]);

    assert!(!output.status.success());
    let stderr = stderr_of(&output);
    assert!(stderr.contains("entry point 'demo.fail.Main' failed"), "stderr: {stderr}");
    assert!(stderr.contains("demo failure after 2 arguments"), "stderr: {stderr}");
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_output_directories_are_condensed_before_launch() {
    let tmp = TempDir::new().unwrap();
    let resources = tmp.path().join("build/resources/main");
    let classes = tmp.path().join("build/classes");
    write(&resources.join("mcmod.info"), "{}");
    write(&classes.join("demo/Mod.class"), "class");
    let mod_classes = format!("{};{}", resources.display(), classes.display());

    let output = run_server(
        &[
            ("mainClass", "demo.echo.Main"),
            ("MOD_CLASSES", mod_classes.as_str()),
        ],
        &[],
    );

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(fs::read_to_string(classes.join("mcmod.info")).unwrap(), "{}");
    assert!(resources.join("mcmod.info").exists(), "Sources stay on disk");
    assert!(
        stdout_of(&output).contains(&format!(
            "property: devlaunch.search.path={}",
            classes.display()
        )),
        "stdout: {}",
        stdout_of(&output)
    );
}

#[test]
fn test_client_publishes_natives_directory() {
    let tmp = TempDir::new().unwrap();
    let natives = tmp.path().join("natives");
    let natives = natives.to_string_lossy();

    let output = run_client(
        &[
            ("mainClass", "demo.echo.Main"),
            ("nativesDirectory", &*natives),
        ],
        &[],
    );

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(stderr_of(&output).contains(&format!("Natives: {natives}")));
    assert!(stdout_of(&output).contains(&format!("property: natives.directory={natives}")));
}
