//! Integration tests for the configuration system.
//!
//! This test suite validates the complete workflow of the configuration
//! system, including file discovery, merging, environment variable handling,
//! and validation, and checks that the result drives the resolver.
//!
//! Tests that modify environment variables are marked with `#[serial]`
//! because environment variables are process-global.

mod common;

use serial_test::serial;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use common::TreeFixture;
use watchroot::config::{ConfigBuilder, ConfigLoader, OutputFormat};
use watchroot::{CaseSensitivityMode, Config, Error, RootResolver, WatchRequest};

// ============================================================================
// Test Utilities
// ============================================================================

/// Helper to create a temporary config file.
fn create_temp_config(dir: &Path, filename: &str, content: &str) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(filename);
    fs::write(&path, content).unwrap();
    path
}

/// RAII guard for setting and restoring environment variables.
struct EnvGuard {
    key: String,
    old_value: Option<String>,
}

impl EnvGuard {
    fn new(key: &str, value: &str) -> Self {
        let old_value = env::var(key).ok();
        env::set_var(key, value);
        Self {
            key: key.to_string(),
            old_value,
        }
    }

    fn remove(key: &str) -> Self {
        let old_value = env::var(key).ok();
        env::remove_var(key);
        Self {
            key: key.to_string(),
            old_value,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.old_value {
            Some(val) => env::set_var(&self.key, val),
            None => env::remove_var(&self.key),
        }
    }
}

/// Clear all `WATCHROOT_*` configuration variables for the test's duration.
fn clear_watchroot_env_vars() -> Vec<EnvGuard> {
    [
        "WATCHROOT_CASE_SENSITIVITY",
        "WATCHROOT_REQUIRE_DIRECTORY",
        "WATCHROOT_MAX_PARALLEL",
        "WATCHROOT_OUTPUT_FORMAT",
    ]
    .iter()
    .map(|k| EnvGuard::remove(k))
    .collect()
}

/// A working directory with an isolated, initially empty user config dir.
struct ConfigEnv {
    temp: TempDir,
}

impl ConfigEnv {
    fn new() -> Self {
        Self {
            temp: TempDir::new().unwrap(),
        }
    }

    fn work_dir(&self) -> PathBuf {
        let dir = self.temp.path().join("work");
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn user_dir(&self) -> PathBuf {
        self.temp.path().join("user")
    }

    fn builder(&self) -> ConfigBuilder {
        ConfigBuilder::new()
            .with_working_dir(self.work_dir())
            .with_config_dir(self.user_dir())
    }
}

// ============================================================================
// File Discovery
// ============================================================================

#[test]
#[serial]
fn test_defaults_without_any_source() {
    let _guards = clear_watchroot_env_vars();
    let env = ConfigEnv::new();

    let config = env.builder().build().unwrap();
    assert_eq!(config, ConfigBuilder::defaults());
}

#[test]
fn test_file_discovery_upward_traversal() {
    let temp = TempDir::new().unwrap();
    let child = temp.path().join("nested").join("deeply");
    fs::create_dir_all(&child).unwrap();
    create_temp_config(temp.path(), "watchroot.yaml", "max_parallel: 9\n");

    let configs = ConfigLoader::discover_project_configs(&child).unwrap();
    assert_eq!(configs.len(), 1);
    assert_eq!(configs[0].config.max_parallel, Some(9));
}

#[test]
fn test_discovery_stops_at_nearest_project() {
    let temp = TempDir::new().unwrap();
    let child = temp.path().join("inner");
    create_temp_config(temp.path(), "watchroot.yaml", "max_parallel: 9\n");
    create_temp_config(&child, "watchroot.local.yaml", "max_parallel: 2\n");

    let configs = ConfigLoader::discover_project_configs(&child).unwrap();
    assert_eq!(configs.len(), 1);
    assert_eq!(configs[0].config.max_parallel, Some(2));
}

// ============================================================================
// Precedence
// ============================================================================

#[test]
#[serial]
fn test_full_precedence_chain() {
    let _guards = clear_watchroot_env_vars();
    let env = ConfigEnv::new();
    let work = env.work_dir();

    create_temp_config(
        &env.user_dir(),
        "config.yaml",
        "case_sensitivity: sensitive\nrequire_directory: false\nmax_parallel: 2\noutput_format: yaml\n",
    );
    create_temp_config(&work, "watchroot.yaml", "max_parallel: 3\noutput_format: json\n");
    create_temp_config(&work, "watchroot.local.yaml", "max_parallel: 5\n");
    let _format = EnvGuard::new("WATCHROOT_OUTPUT_FORMAT", "human");

    let config = env
        .builder()
        .with_config(Config {
            case_sensitivity: Some(CaseSensitivityMode::Insensitive),
            ..Default::default()
        })
        .build()
        .unwrap();

    assert_eq!(config.case_sensitivity, Some(CaseSensitivityMode::Insensitive));
    assert_eq!(config.require_directory, Some(false));
    assert_eq!(config.max_parallel, Some(5));
    assert_eq!(config.output_format, Some(OutputFormat::Human));
}

#[test]
#[serial]
fn test_env_overrides_files() {
    let _guards = clear_watchroot_env_vars();
    let env = ConfigEnv::new();
    create_temp_config(&env.work_dir(), "watchroot.yaml", "max_parallel: 3\n");
    let _max = EnvGuard::new("WATCHROOT_MAX_PARALLEL", "12");

    let config = env.builder().build().unwrap();
    assert_eq!(config.max_parallel, Some(12));
}

#[test]
#[serial]
fn test_skip_files_and_env() {
    let _guards = clear_watchroot_env_vars();
    let env = ConfigEnv::new();
    create_temp_config(&env.work_dir(), "watchroot.yaml", "max_parallel: 3\n");
    let _max = EnvGuard::new("WATCHROOT_MAX_PARALLEL", "12");

    let config = env.builder().skip_files().skip_env().build().unwrap();
    assert_eq!(config, ConfigBuilder::defaults());
}

// ============================================================================
// Errors
// ============================================================================

#[test]
#[serial]
fn test_malformed_yaml_names_the_file() {
    let _guards = clear_watchroot_env_vars();
    let env = ConfigEnv::new();
    let path = create_temp_config(&env.work_dir(), "watchroot.yaml", "max_parallel: [1, 2\n");

    let err = env.builder().build().unwrap_err();
    match err {
        Error::Configuration { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected configuration error, got {other:?}"),
    }
}

#[test]
#[serial]
fn test_unknown_field_rejected() {
    let _guards = clear_watchroot_env_vars();
    let env = ConfigEnv::new();
    create_temp_config(&env.user_dir(), "config.yaml", "follow_symlinks: true\n");

    let err = env.builder().build().unwrap_err();
    assert!(err.to_string().contains("follow_symlinks"));
}

#[test]
#[serial]
fn test_out_of_range_file_value_rejected() {
    let _guards = clear_watchroot_env_vars();
    let env = ConfigEnv::new();
    create_temp_config(&env.work_dir(), "watchroot.yaml", "max_parallel: 0\n");

    let err = env.builder().build().unwrap_err();
    assert!(matches!(err, Error::Validation { ref field, .. } if field == "max_parallel"));
}

#[test]
#[serial]
fn test_invalid_env_mode_rejected() {
    let _guards = clear_watchroot_env_vars();
    let env = ConfigEnv::new();
    let _mode = EnvGuard::new("WATCHROOT_CASE_SENSITIVITY", "mostly");

    let err = env.builder().build().unwrap_err();
    assert!(err.to_string().contains("mostly"));
}

#[test]
#[serial]
fn test_empty_file_is_empty_config() {
    let _guards = clear_watchroot_env_vars();
    let env = ConfigEnv::new();
    create_temp_config(&env.work_dir(), "watchroot.yaml", "\n");

    assert_eq!(env.builder().build().unwrap(), ConfigBuilder::defaults());
}

// ============================================================================
// Configuration drives resolution
// ============================================================================

#[test]
#[serial]
fn test_config_selects_case_mode() {
    let _guards = clear_watchroot_env_vars();
    let env = ConfigEnv::new();
    create_temp_config(
        &env.work_dir(),
        "watchroot.yaml",
        "case_sensitivity: insensitive\n",
    );
    let config = env.builder().build().unwrap();

    let fs = Arc::new(TreeFixture::sensitive().with_dir("/srv/Data").build());
    let resolver = RootResolver::from_config_with_fs(&config, fs);

    // Declared insensitive, so the exact spelling is still walked and accepted
    assert!(resolver
        .resolve(&WatchRequest::new("/srv/Data"))
        .unwrap()
        .is_resolved());
}

#[test]
#[serial]
fn test_config_allows_file_roots() {
    let _guards = clear_watchroot_env_vars();
    let env = ConfigEnv::new();
    let _dirs = EnvGuard::new("WATCHROOT_REQUIRE_DIRECTORY", "no");
    let config = env.builder().build().unwrap();

    let fs = Arc::new(TreeFixture::insensitive().with_file("/etc/Hosts").build());
    let resolver = RootResolver::from_config_with_fs(&config, fs);
    assert!(resolver
        .resolve(&WatchRequest::new("/etc/Hosts"))
        .unwrap()
        .is_resolved());
}
