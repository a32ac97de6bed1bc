//! Error types for the watchroot library.
//!
//! This module provides the error hierarchy for root resolution, using
//! `thiserror` for ergonomic error handling.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::outcome::CaseMismatch;

/// Result type alias for operations that may fail with a watchroot error.
///
/// # Examples
///
/// ```
/// use watchroot::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(4)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the watchroot library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A path does not exist.
    #[error("path not found: {}", path.display())]
    PathNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Permission denied accessing a path.
    #[error("permission denied: {}", path.display())]
    PermissionDenied {
        /// The path that could not be accessed.
        path: PathBuf,
    },

    /// The resolved root exists but is not a directory.
    #[error("not a directory: {}", path.display())]
    NotADirectory {
        /// The canonical path that is not a directory.
        path: PathBuf,
    },

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A configuration file could not be parsed.
    #[error("configuration error in {}: {source}", path.display())]
    Configuration {
        /// The file that failed to parse.
        path: PathBuf,
        /// The underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },

    /// The requested root does not match the on-disk casing.
    #[error("{0}")]
    RootResolve(Box<CaseMismatch>),
}

impl Error {
    /// Map an I/O error raised while examining `path` onto the error taxonomy.
    ///
    /// `NotFound` and `PermissionDenied` keep the path that failed; every
    /// other kind is surfaced as [`Error::Io`].
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io;
    /// use std::path::Path;
    /// use watchroot::Error;
    ///
    /// let err = Error::from_io(io::Error::from(io::ErrorKind::NotFound), Path::new("/gone"));
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn from_io(err: std::io::Error, path: &Path) -> Self {
        match err.kind() {
            ErrorKind::NotFound => Self::PathNotFound {
                path: path.to_path_buf(),
            },
            ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => Self::Io(err),
        }
    }

    /// Check if error indicates a path does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use watchroot::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::PathNotFound { path: PathBuf::from("/nonexistent") };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PathNotFound { .. })
    }

    /// Check if error is permission-related.
    ///
    /// # Examples
    ///
    /// ```
    /// use watchroot::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::PermissionDenied { path: PathBuf::from("/restricted") };
    /// assert!(err.is_permission_denied());
    /// ```
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }

    /// Check if error is a case mismatch raised by [`crate::RootResolver::resolve_root`].
    #[must_use]
    pub fn is_case_mismatch(&self) -> bool {
        matches!(self, Self::RootResolve(_))
    }
}

impl From<CaseMismatch> for Error {
    fn from(mismatch: CaseMismatch) -> Self {
        Self::RootResolve(Box::new(mismatch))
    }
}
