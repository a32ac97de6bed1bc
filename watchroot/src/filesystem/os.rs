//! Filesystem access backed by `std::fs`.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{EntryKind, Filesystem};

/// Production implementation that queries the host filesystem.
///
/// # Examples
///
/// ```no_run
/// use watchroot::filesystem::{Filesystem, OsFilesystem};
/// use std::path::Path;
///
/// let fs = OsFilesystem;
/// let canonical = fs.canonicalize(Path::new("/tmp")).unwrap();
/// assert!(canonical.is_absolute());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFilesystem;

impl Filesystem for OsFilesystem {
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path)
    }

    fn metadata(&self, path: &Path) -> io::Result<EntryKind> {
        let meta = fs::metadata(path)?;
        Ok(if meta.is_dir() {
            EntryKind::Directory
        } else if meta.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        })
    }

    fn read_dir_names(&self, path: &Path) -> io::Result<Vec<OsString>> {
        fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect()
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        env::current_dir()
    }
}
