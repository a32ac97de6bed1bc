//! Configuration schema definitions.
//!
//! This module defines the configuration structure for watchroot. Every field
//! is optional so that partial files from different sources can be merged.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::case::CaseSensitivityMode;

/// Default number of worker threads used by batch resolution.
pub const DEFAULT_MAX_PARALLEL: usize = 4;

/// Upper bound accepted for `max_parallel`.
pub const MAX_PARALLEL_LIMIT: usize = 256;

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use watchroot::config::{Config, OutputFormat};
/// use watchroot::CaseSensitivityMode;
///
/// let config = Config {
///     case_sensitivity: Some(CaseSensitivityMode::Insensitive),
///     output_format: Some(OutputFormat::Json),
///     ..Default::default()
/// };
/// assert_eq!(config.max_parallel, None);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// How the case behavior of the target filesystem is decided.
    pub case_sensitivity: Option<CaseSensitivityMode>,

    /// Reject roots that resolve to something other than a directory.
    pub require_directory: Option<bool>,

    /// Maximum worker threads for batch resolution.
    pub max_parallel: Option<usize>,

    /// Output format for resolution reports.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Effective case sensitivity mode.
    #[must_use]
    pub fn case_sensitivity_or_default(&self) -> CaseSensitivityMode {
        self.case_sensitivity.unwrap_or_default()
    }

    /// Effective directory requirement.
    #[must_use]
    pub fn require_directory_or_default(&self) -> bool {
        self.require_directory.unwrap_or(true)
    }

    /// Effective worker limit.
    #[must_use]
    pub fn max_parallel_or_default(&self) -> usize {
        self.max_parallel.unwrap_or(DEFAULT_MAX_PARALLEL)
    }

    /// Effective output format.
    #[must_use]
    pub fn output_format_or_default(&self) -> OutputFormat {
        self.output_format.unwrap_or_default()
    }
}

/// Output format for resolution reports.
///
/// # Examples
///
/// ```
/// use watchroot::config::OutputFormat;
///
/// let format = OutputFormat::Json;
/// assert_eq!(format.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One line per root, diagnostics in prose.
    #[default]
    Human,
    /// JSON output format.
    Json,
    /// YAML output format.
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Human => write!(f, "human"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}
