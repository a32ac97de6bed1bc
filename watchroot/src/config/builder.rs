//! Layered configuration assembly.

use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::{Config, OutputFormat, DEFAULT_MAX_PARALLEL};
use crate::config::validator::ConfigValidator;
use crate::case::CaseSensitivityMode;
use crate::error::{Error, Result};

/// Builds the effective configuration from defaults, files, environment
/// and programmatic overrides.
///
/// # Examples
///
/// ```
/// use watchroot::config::{Config, ConfigBuilder};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config { max_parallel: Some(2), ..Default::default() })
///     .build()
///     .unwrap();
///
/// assert_eq!(config.max_parallel, Some(2));
/// assert_eq!(config.require_directory, Some(true));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    working_dir: Option<PathBuf>,
    config_dir: Option<PathBuf>,
    overrides: Vec<Config>,
    skip_files: bool,
    skip_env: bool,
}

impl ConfigBuilder {
    /// Create a builder that reads every source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory project configuration discovery starts from.
    ///
    /// Defaults to the process working directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Directory holding the user `config.yaml`, instead of `~/.watchroot`.
    #[must_use]
    pub fn with_config_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Apply `config` above every other source. May be called repeatedly;
    /// later calls win.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides.push(config);
        self
    }

    /// Do not read any configuration files.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Do not read `WATCHROOT_*` environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Merge every source and validate the result.
    ///
    /// All fields of the returned configuration are set.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, an environment
    /// variable is malformed, or the merged values are out of range.
    pub fn build(self) -> Result<Config> {
        let mut config = Self::defaults();

        if !self.skip_files {
            let working_dir = match self.working_dir {
                Some(dir) => dir,
                None => std::env::current_dir().map_err(|e| Error::InvalidPath {
                    path: PathBuf::from("."),
                    reason: format!("Cannot get current directory: {e}"),
                })?,
            };
            let sources = ConfigLoader::load_all(&working_dir, self.config_dir.as_deref())?;
            for source in &sources {
                ConfigValidator::validate(&source.config)?;
            }
            ConfigMerger::merge_into(&mut config, &ConfigMerger::merge(sources));
        }

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        for overrides in &self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        ConfigValidator::validate(&config)?;
        log::debug!("effective configuration: {config:?}");
        Ok(config)
    }

    /// The built-in defaults with every field set.
    #[must_use]
    pub fn defaults() -> Config {
        Config {
            case_sensitivity: Some(CaseSensitivityMode::Auto),
            require_directory: Some(true),
            max_parallel: Some(DEFAULT_MAX_PARALLEL),
            output_format: Some(OutputFormat::Human),
        }
    }
}
