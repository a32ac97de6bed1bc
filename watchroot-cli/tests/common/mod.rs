//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builders isolated from the caller's configuration
//! - Fixtures for directory trees and config files

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables the CLI reads.
const WATCHROOT_ENV: &[&str] = &[
    "WATCHROOT_CASE_SENSITIVITY",
    "WATCHROOT_REQUIRE_DIRECTORY",
    "WATCHROOT_MAX_PARALLEL",
    "WATCHROOT_OUTPUT_FORMAT",
    "WATCHROOT_CONFIG_DIR",
    "WATCHROOT_LOG_MODE",
];

/// Test environment with an isolated config directory.
///
/// Commands run from inside the temporary directory so project config
/// discovery never reaches the developer's own files.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the user config directory
    pub config_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        // Canonical so expected output matches on hosts with symlinked temp dirs
        let temp_path = temp_dir
            .path()
            .canonicalize()
            .expect("Failed to canonicalize temp dir");
        let config_dir = temp_path.join("watchroot-config");

        Self {
            temp_dir,
            temp_path,
            config_dir,
        }
    }

    /// Get a command builder without `--config-dir`.
    ///
    /// Inherited `WATCHROOT_*` variables are cleared and the working
    /// directory is the temporary directory.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("watchroot").expect("Failed to find watchroot binary");
        for var in WATCHROOT_ENV {
            cmd.env_remove(var);
        }
        cmd.current_dir(&self.temp_path);
        cmd
    }

    /// Get a command builder with the config directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--config-dir").arg(&self.config_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Create a subdirectory (and its parents) in the test environment.
    pub fn create_dir(&self, name: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::create_dir_all(&path).expect("Failed to create test directory");
        path
    }

    /// Create an empty file in the test environment.
    pub fn create_file(&self, name: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, "").expect("Failed to create test file");
        path
    }

    /// Write the user-level `config.yaml`.
    pub fn write_user_config(&self, contents: &str) -> PathBuf {
        std::fs::create_dir_all(&self.config_dir).expect("Failed to create config dir");
        let path = self.config_dir.join("config.yaml");
        std::fs::write(&path, contents).expect("Failed to write config");
        path
    }

    /// Write a file with the given contents in the test environment.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, contents).expect("Failed to write file");
        path
    }

    /// Run `resolve` on the given paths and return stdout.
    ///
    /// # Panics
    /// Panics if the command fails.
    pub fn resolve_ok(&self, paths: &[&Path]) -> String {
        let output = self
            .command()
            .arg("resolve")
            .args(paths)
            .output()
            .expect("Failed to run resolve command");

        assert!(
            output.status.success(),
            "Resolve failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
