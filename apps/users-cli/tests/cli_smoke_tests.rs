//! CLI smoke tests for the users-cli binary
//!
//! Every run gets its own config file so logs land in a temporary home_dir.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Helper to run the users-cli binary with given arguments
fn run_users_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_users-cli"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute users-cli")
}

fn write_config(dir: &Path, extra: &str) -> PathBuf {
    let home = dir.join("home").to_string_lossy().replace('\\', "/");
    let path = dir.join("config.yaml");
    let yaml = format!(
        r#"
home_dir: "{home}"
logging:
  default:
    console_level: warn
    file: "logs/cli.log"
    file_level: debug
{extra}"#
    );
    fs::write(&path, yaml).unwrap();
    path
}

fn run_with_config(dir: &TempDir, extra: &str, args: &[&str]) -> Output {
    let cfg = write_config(dir.path(), extra);
    let cfg = cfg.to_string_lossy().to_string();
    let mut full = vec!["--config", cfg.as_str()];
    full.extend_from_slice(args);
    run_users_cli(&full)
}

#[test]
fn test_cli_help_command() {
    let output = run_users_cli(&["--help"]);

    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("users-cli"), "Should contain binary name");
    assert!(stdout.contains("Usage:"), "Should contain usage information");
    assert!(stdout.contains("demo"), "Should contain 'demo' subcommand");
    assert!(stdout.contains("list"), "Should contain 'list' subcommand");
    assert!(stdout.contains("check"), "Should contain 'check' subcommand");
    assert!(stdout.contains("--config"), "Should mention config option");
}

#[test]
fn test_cli_invalid_command() {
    let output = run_users_cli(&["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");
}

#[test]
fn test_demo_prints_one_json_line_per_step() {
    let tmp = TempDir::new().unwrap();
    let output = run_with_config(&tmp, "", &["demo"]);

    assert!(
        output.status.success(),
        "demo failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    let steps: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(steps.len(), 6);
    assert_eq!(steps[0]["user"]["id"], 1);
    assert_eq!(steps[1]["outcome"], "conflict");
    assert_eq!(steps[1]["error"], "Username already exists: alice");
    assert_eq!(steps[2]["user"]["email"], "new@x.com");
    assert_eq!(steps[3]["user"]["active"], false);
    assert_eq!(steps[5]["outcome"], "absent");

    assert!(tmp.path().join("home/logs/cli.log").exists());
}

#[test]
fn test_demo_uses_module_config() {
    let tmp = TempDir::new().unwrap();
    let extra = "modules:\n  users_info:\n    first_id: 77\n";
    let output = run_with_config(&tmp, extra, &["demo"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let first: serde_json::Value = serde_json::from_str(stdout.lines().next().unwrap()).unwrap();
    assert_eq!(first["user"]["id"], 77);
}

#[test]
fn test_list_prints_active_users() {
    let tmp = TempDir::new().unwrap();
    let output = run_with_config(&tmp, "", &["list"]);

    assert!(output.status.success());
    let users: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<_> = users.iter().map(|u| u["username"].clone()).collect();
    assert_eq!(names, ["alice", "carol"]);
}

#[test]
fn test_check_rejects_invalid_module_config() {
    let tmp = TempDir::new().unwrap();
    let extra = "modules:\n  users_info:\n    first_id: -5\n";
    let output = run_with_config(&tmp, extra, &["check"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("first_id must be positive"));
}

#[test]
fn test_print_config_outputs_yaml() {
    let tmp = TempDir::new().unwrap();
    let output = run_with_config(&tmp, "", &["--print-config"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("home_dir:"));
    assert!(stdout.contains("logging:"));
}
