//! Configuration validation.
//!
//! Type-level checks (known fields, enum spellings) happen while parsing;
//! this module checks the value ranges serde cannot express.

use crate::config::schema::{Config, MAX_PARALLEL_LIMIT};
use crate::error::{Error, Result};

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use watchroot::config::{Config, ConfigValidator};
///
/// let config = Config::default();
/// ConfigValidator::validate(&config).unwrap();
///
/// let bad = Config { max_parallel: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first invalid field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(max_parallel) = config.max_parallel {
            Self::validate_max_parallel(max_parallel)?;
        }
        Ok(())
    }

    fn validate_max_parallel(value: usize) -> Result<()> {
        if value == 0 {
            return Err(Error::Validation {
                field: "max_parallel".into(),
                message: "must be at least 1".into(),
            });
        }
        if value > MAX_PARALLEL_LIMIT {
            return Err(Error::Validation {
                field: "max_parallel".into(),
                message: format!("must be at most {MAX_PARALLEL_LIMIT}, got {value}"),
            });
        }
        Ok(())
    }
}
