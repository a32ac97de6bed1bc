//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading and resolver construction.

use crate::error::CliError;
use std::path::PathBuf;
use watchroot::{Config, ConfigBuilder, Logger, RootResolver};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Directory holding the user `config.yaml`.
    pub config_dir: Option<PathBuf>,

    /// Logger configured from the verbosity flags.
    pub logger: Logger,
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Command-line options (highest priority)
/// 2. Environment variables
/// 3. Configuration files
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions, overrides: Config) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new().with_config(overrides);
    if let Some(ref dir) = global.config_dir {
        builder = builder.with_config_dir(dir);
    }

    builder.build().map_err(|e| match e {
        watchroot::Error::Configuration { .. } | watchroot::Error::Validation { .. } => {
            CliError::Library(e)
        }
        other => CliError::Config(other.to_string()),
    })
}

/// Build a resolver over the host filesystem from configuration.
pub fn build_resolver(global: &GlobalOptions, config: &Config) -> RootResolver {
    global.logger.debug(&format!(
        "case sensitivity: {}, require directory: {}, max parallel: {}",
        config.case_sensitivity_or_default(),
        config.require_directory_or_default(),
        config.max_parallel_or_default()
    ));
    RootResolver::from_config(config)
}
