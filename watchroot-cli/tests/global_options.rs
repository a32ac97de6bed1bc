//! Integration tests for global CLI options.
//!
//! These tests verify global flags and environment variables that affect
//! all commands, including:
//! - --verbose flag
//! - --quiet flag
//! - --config-dir override and WATCHROOT_CONFIG_DIR
//! - WATCHROOT_LOG_MODE
//! - Precedence rules (CLI flags > env vars > config files > defaults)

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_verbose_flag_increases_logging() {
    let env = TestEnv::new();
    let root = env.create_dir("project");

    let normal = env.command().arg("resolve").arg(&root).output().unwrap();
    let verbose = env
        .command()
        .arg("--verbose")
        .arg("resolve")
        .arg(&root)
        .output()
        .unwrap();

    assert!(normal.status.success());
    assert!(verbose.status.success());
    assert!(normal.stderr.is_empty());
    assert!(String::from_utf8(verbose.stderr).unwrap().contains("DEBUG:"));
}

#[test]
fn test_verbose_flag_after_subcommand() {
    let env = TestEnv::new();
    let root = env.create_dir("project");

    env.command()
        .arg("resolve")
        .arg(&root)
        .arg("--verbose")
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG:"));
}

#[test]
fn test_quiet_flag_suppresses_validate_message() {
    let env = TestEnv::new();
    let config = env.write_file("watchroot.yaml", "max_parallel: 2\n");

    env.command()
        .arg("--quiet")
        .arg("validate")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_quiet_does_not_hide_errors() {
    let env = TestEnv::new();

    env.command()
        .arg("--quiet")
        .arg("resolve")
        .arg(env.path().join("missing"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_log_mode_env_enables_debug() {
    let env = TestEnv::new();
    let root = env.create_dir("project");

    env.command()
        .env("WATCHROOT_LOG_MODE", "verbose")
        .arg("resolve")
        .arg(&root)
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG:"));
}

#[test]
fn test_config_dir_env_variable() {
    let env = TestEnv::new();
    let root = env.create_dir("project");
    env.write_user_config("output_format: json\n");

    env.command_bare()
        .env("WATCHROOT_CONFIG_DIR", &env.config_dir)
        .arg("resolve")
        .arg(&root)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"roots\""));
}

#[test]
fn test_config_dir_flag_beats_env_variable() {
    let env = TestEnv::new();
    let root = env.create_dir("project");
    env.write_user_config("output_format: json\n");
    let empty = env.create_dir("empty-config");

    env.command_bare()
        .env("WATCHROOT_CONFIG_DIR", &env.config_dir)
        .arg("--config-dir")
        .arg(&empty)
        .arg("resolve")
        .arg(&root)
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", root.display())));
}

#[test]
fn test_local_project_config_beats_project_config() {
    let env = TestEnv::new();
    let root = env.create_dir("project");
    env.write_file("watchroot.yaml", "output_format: json\n");
    env.write_file("watchroot.local.yaml", "output_format: yaml\n");

    env.command()
        .arg("resolve")
        .arg(&root)
        .assert()
        .success()
        .stdout(predicate::str::contains("status: resolved"));
}
