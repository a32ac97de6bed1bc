//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use watchroot::config::{Config, ConfigMerger};
///
/// let low = Config { max_parallel: Some(2), ..Default::default() };
/// let high = Config { max_parallel: Some(8), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.max_parallel, Some(8));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();

        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }

        result
    }

    /// Merge source config into target (source overwrites target where set).
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.case_sensitivity.is_some() {
            target.case_sensitivity = source.case_sensitivity;
        }

        if source.require_directory.is_some() {
            target.require_directory = source.require_directory;
        }

        if source.max_parallel.is_some() {
            target.max_parallel = source.max_parallel;
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }
    }
}
