//! Common test utilities for integration tests.
//!
//! This module provides fixture builders for resolving against synthetic
//! and on-disk trees.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use watchroot::filesystem::MemoryFilesystem;
use watchroot::{CaseSensitivity, FixedCaseSensitivity, RootResolver};

/// Creates a temporary directory for testing.
///
/// The directory will be automatically cleaned up when the returned
/// `TempDir` is dropped.
#[allow(dead_code)]
pub fn create_temp_dir() -> std::io::Result<tempfile::TempDir> {
    tempfile::tempdir()
}

/// Canonical form of a temporary directory's path.
///
/// Some hosts keep temporary directories behind a symlink (`/var` on macOS).
#[allow(dead_code)]
pub fn canonical_temp_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path()
        .canonicalize()
        .expect("Failed to canonicalize temp dir")
}

/// Builder for synthetic directory trees.
///
/// # Examples
///
/// ```no_run
/// # use common::TreeFixture;
/// let resolver = TreeFixture::insensitive()
///     .with_dir("/tmp/FOO/bar")
///     .with_file("/tmp/notes.txt")
///     .resolver();
/// ```
#[allow(dead_code)]
pub struct TreeFixture {
    fs: MemoryFilesystem,
}

#[allow(dead_code)]
impl TreeFixture {
    /// An empty case-insensitive tree.
    pub fn insensitive() -> Self {
        Self {
            fs: MemoryFilesystem::new(CaseSensitivity::Insensitive),
        }
    }

    /// An empty case-sensitive tree.
    pub fn sensitive() -> Self {
        Self {
            fs: MemoryFilesystem::new(CaseSensitivity::Sensitive),
        }
    }

    /// Add a directory and its parents.
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        self.fs.create_dir_all(path);
        self
    }

    /// Add an empty file.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.fs.create_file(path);
        self
    }

    /// Add a symlink at `link` pointing to `target`.
    pub fn with_symlink(self, target: impl Into<PathBuf>, link: impl AsRef<Path>) -> Self {
        self.fs.symlink(target, link);
        self
    }

    /// Make a directory unreadable.
    pub fn with_denied(self, path: impl AsRef<Path>) -> Self {
        self.fs.deny(path);
        self
    }

    /// Let `path` be traversed but not listed.
    pub fn with_unlistable(self, path: impl AsRef<Path>) -> Self {
        self.fs.deny_listing(path);
        self
    }

    /// Anchor relative requests at `dir`.
    pub fn with_current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.fs = self.fs.with_current_dir(dir);
        self
    }

    /// Echo the caller's spelling from `canonicalize`.
    pub fn with_literal_canonicalize(mut self) -> Self {
        self.fs = self.fs.with_literal_canonicalize(true);
        self
    }

    /// The tree itself.
    pub fn build(self) -> MemoryFilesystem {
        self.fs
    }

    /// A resolver whose probe matches the tree's own case behavior.
    pub fn resolver(self) -> RootResolver {
        let sensitivity = self.fs.sensitivity();
        RootResolver::new(
            Arc::new(self.fs),
            Arc::new(FixedCaseSensitivity(sensitivity)),
        )
    }
}
