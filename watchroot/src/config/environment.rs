//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `WATCHROOT_*` environment variables that
//! override configuration file values.

use crate::case::CaseSensitivityMode;
use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};
use std::env;

/// Overrides `case_sensitivity`.
pub const ENV_CASE_SENSITIVITY: &str = "WATCHROOT_CASE_SENSITIVITY";
/// Overrides `require_directory`.
pub const ENV_REQUIRE_DIRECTORY: &str = "WATCHROOT_REQUIRE_DIRECTORY";
/// Overrides `max_parallel`.
pub const ENV_MAX_PARALLEL: &str = "WATCHROOT_MAX_PARALLEL";
/// Overrides `output_format`.
pub const ENV_OUTPUT_FORMAT: &str = "WATCHROOT_OUTPUT_FORMAT";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use watchroot::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(val) = env::var(ENV_CASE_SENSITIVITY) {
            config.case_sensitivity = Some(CaseSensitivityMode::parse(&val).map_err(|_| {
                Error::Validation {
                    field: ENV_CASE_SENSITIVITY.into(),
                    message: format!("Invalid mode: '{val}' (expected auto/sensitive/insensitive)"),
                }
            })?);
        }

        if let Ok(val) = env::var(ENV_REQUIRE_DIRECTORY) {
            config.require_directory = Some(Self::parse_bool(ENV_REQUIRE_DIRECTORY, &val)?);
        }

        if let Ok(val) = env::var(ENV_MAX_PARALLEL) {
            config.max_parallel = Some(val.trim().parse().map_err(|_| Error::Validation {
                field: ENV_MAX_PARALLEL.into(),
                message: format!("Invalid number: '{val}'"),
            })?);
        }

        if let Ok(val) = env::var(ENV_OUTPUT_FORMAT) {
            config.output_format = Some(Self::parse_format(&val)?);
        }

        Ok(())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }

    fn parse_format(s: &str) -> Result<OutputFormat> {
        match s.trim().to_lowercase().as_str() {
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            _ => Err(Error::Validation {
                field: ENV_OUTPUT_FORMAT.into(),
                message: format!("Invalid format: '{s}' (expected human/json/yaml)"),
            }),
        }
    }
}
