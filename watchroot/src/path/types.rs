//! Core types for watch-root resolution.
//!
//! This module defines the request a caller submits, the canonical path the
//! OS reports for it, and the per-component view used in diagnostics.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

/// A path exactly as a caller asked to watch it.
///
/// Relative requests are anchored at the base directory when one is given,
/// otherwise at the filesystem's current directory.
///
/// # Examples
///
/// ```
/// use watchroot::WatchRequest;
/// use std::path::Path;
///
/// let request = WatchRequest::new("src/App").with_base_dir("/work");
/// assert_eq!(request.path(), Path::new("src/App"));
/// assert_eq!(request.base_dir(), Some(Path::new("/work")));
/// assert_eq!(request.to_string(), "src/App");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WatchRequest {
    path: PathBuf,
    base_dir: Option<PathBuf>,
}

impl WatchRequest {
    /// Create a request for `path` as typed.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            base_dir: None,
        }
    }

    /// Anchor relative requests at `dir` instead of the current directory.
    #[must_use]
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// The path as typed.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The explicit base directory, if any.
    #[must_use]
    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }
}

impl fmt::Display for WatchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl From<&str> for WatchRequest {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<PathBuf> for WatchRequest {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

/// An absolute, symlink-free path as reported by the filesystem.
///
/// # Examples
///
/// ```
/// use watchroot::CanonicalPath;
/// use std::path::PathBuf;
///
/// let canonical = CanonicalPath::new(PathBuf::from("/srv/data")).unwrap();
/// assert_eq!(canonical.as_path(), std::path::Path::new("/srv/data"));
///
/// assert!(CanonicalPath::new(PathBuf::from("relative")).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalPath(PathBuf);

impl CanonicalPath {
    /// Wrap a path produced by a canonicalization primitive.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not rooted.
    pub fn new(path: PathBuf) -> Result<Self> {
        if !path.has_root() {
            return Err(Error::InvalidPath {
                path,
                reason: "Canonical path must be absolute".to_string(),
            });
        }
        Ok(Self(path))
    }

    /// Get a reference to the path.
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Convert into the underlying `PathBuf`.
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for CanonicalPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for CanonicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl Serialize for CanonicalPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0.display())
    }
}

/// One path segment, as requested and as stored on disk.
///
/// `stored` is `None` when the parent's listing holds no entry matching the
/// requested name under any casing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathComponent {
    requested: OsString,
    stored: Option<OsString>,
}

impl PathComponent {
    /// Create a component view.
    #[must_use]
    pub fn new(requested: impl Into<OsString>, stored: Option<OsString>) -> Self {
        Self {
            requested: requested.into(),
            stored,
        }
    }

    /// The name the caller typed.
    #[must_use]
    pub fn requested(&self) -> &OsStr {
        &self.requested
    }

    /// The name the filesystem stores, if it could be found.
    #[must_use]
    pub fn stored(&self) -> Option<&OsStr> {
        self.stored.as_deref()
    }

    /// True when both forms are known and byte-identical.
    #[must_use]
    pub fn matches_exactly(&self) -> bool {
        self.stored.as_deref() == Some(self.requested.as_os_str())
    }
}

impl Serialize for PathComponent {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("PathComponent", 2)?;
        state.serialize_field("requested", &self.requested.to_string_lossy())?;
        state.serialize_field(
            "stored",
            &self.stored.as_ref().map(|s| s.to_string_lossy()),
        )?;
        state.end()
    }
}
