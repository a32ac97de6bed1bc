//! Filesystem primitives consumed by the resolver.
//!
//! The resolver never touches `std::fs` directly. Everything it needs to know
//! about the target filesystem goes through the [`Filesystem`] trait, so the
//! same resolution code runs against the real disk ([`OsFilesystem`]) and
//! against synthetic trees ([`MemoryFilesystem`]) whose case sensitivity can
//! be chosen freely in tests.

mod memory;
mod os;

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

pub use memory::MemoryFilesystem;
pub use os::OsFilesystem;

/// What a path refers to after following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A directory.
    Directory,
    /// A regular file.
    File,
    /// Anything else (sockets, devices, fifos).
    Other,
}

impl EntryKind {
    /// Returns true for directories.
    #[must_use]
    pub fn is_dir(self) -> bool {
        matches!(self, Self::Directory)
    }
}

/// Read-only filesystem queries used during root resolution.
///
/// Implementations must be safe to share across threads: concurrent
/// resolution attempts call into the same instance without coordination.
///
/// # Examples
///
/// ```
/// use watchroot::filesystem::{EntryKind, Filesystem, MemoryFilesystem};
/// use watchroot::CaseSensitivity;
/// use std::path::Path;
///
/// let fs = MemoryFilesystem::new(CaseSensitivity::Insensitive);
/// fs.create_dir_all("/work/Project");
///
/// // Case-insensitive lookups succeed but report the stored casing
/// assert_eq!(fs.metadata(Path::new("/work/project")).unwrap(), EntryKind::Directory);
/// assert_eq!(
///     fs.canonicalize(Path::new("/work/project")).unwrap(),
///     Path::new("/work/Project")
/// );
/// ```
pub trait Filesystem: Send + Sync {
    /// Resolve `path` to an absolute path with symlinks and `.`/`..` removed.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error, typically `NotFound` or
    /// `PermissionDenied`.
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;

    /// Stat `path`, following symlinks.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the entry cannot be examined.
    fn metadata(&self, path: &Path) -> io::Result<EntryKind>;

    /// List the entry names stored in directory `path`, exactly as the
    /// filesystem records them.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the directory cannot be read.
    fn read_dir_names(&self, path: &Path) -> io::Result<Vec<OsString>>;

    /// The directory relative requests are anchored at.
    ///
    /// # Errors
    ///
    /// Returns an error when the working directory cannot be determined.
    fn current_dir(&self) -> io::Result<PathBuf>;
}
