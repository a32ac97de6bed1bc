//! Path canonicalization.
//!
//! The canonicalizer turns a [`WatchRequest`] into the absolute,
//! symlink-resolved path the filesystem reports for it. It performs no case
//! normalization of its own: on a case-insensitive filesystem the result may
//! be spelled differently from the request, which is what the case checker
//! is for.

use crate::error::{Error, Result};
use crate::filesystem::Filesystem;
use crate::path::normalize::{self, AnchoredPath};
use crate::path::types::{CanonicalPath, WatchRequest};

/// Canonicalizes watch requests through a [`Filesystem`].
///
/// # Examples
///
/// ```
/// use watchroot::filesystem::MemoryFilesystem;
/// use watchroot::path::Canonicalizer;
/// use watchroot::{CaseSensitivity, WatchRequest};
/// use std::path::Path;
///
/// let fs = MemoryFilesystem::new(CaseSensitivity::Insensitive);
/// fs.create_dir_all("/tmp/FOO/bar");
///
/// let canonical = Canonicalizer::new(&fs)
///     .canonicalize(&WatchRequest::new("/tmp/foo/bar"))
///     .unwrap();
/// assert_eq!(canonical.as_path(), Path::new("/tmp/FOO/bar"));
/// ```
pub struct Canonicalizer<'a> {
    fs: &'a dyn Filesystem,
}

impl<'a> Canonicalizer<'a> {
    /// Create a canonicalizer over `fs`.
    #[must_use]
    pub fn new(fs: &'a dyn Filesystem) -> Self {
        Self { fs }
    }

    /// Split a request into its anchor and its typed components.
    ///
    /// # Errors
    ///
    /// Returns an error if tilde expansion fails or, for relative requests
    /// without a base directory, the current directory is unavailable.
    pub fn anchor(&self, request: &WatchRequest) -> Result<AnchoredPath> {
        let base = match request.base_dir() {
            Some(dir) => dir.to_path_buf(),
            None => self.fs.current_dir().map_err(|e| Error::InvalidPath {
                path: request.path().to_path_buf(),
                reason: format!("Cannot get current directory: {e}"),
            })?,
        };
        normalize::anchor(request.path(), &base)
    }

    /// Canonicalize the request.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path does not exist (`PathNotFound`)
    /// - Permission is denied (`PermissionDenied`)
    /// - Any other I/O error occurs (`Io`)
    pub fn canonicalize(&self, request: &WatchRequest) -> Result<CanonicalPath> {
        let anchored = self.anchor(request)?;
        self.canonicalize_anchored(&anchored)
    }

    /// Canonicalize an already anchored request.
    ///
    /// # Errors
    ///
    /// Same as [`Canonicalizer::canonicalize`].
    pub fn canonicalize_anchored(&self, anchored: &AnchoredPath) -> Result<CanonicalPath> {
        let full = anchored.joined();
        let canonical = self
            .fs
            .canonicalize(&full)
            .map_err(|e| Error::from_io(e, &full))?;
        CanonicalPath::new(canonical)
    }
}
