//! Strict case verification of a canonicalized request.
//!
//! On a case-insensitive filesystem the OS happily opens `/tmp/foo` when the
//! directory is stored as `/tmp/FOO`. A watcher keyed on the typed spelling
//! would then disagree with every path the OS reports back. The checker
//! walks the components the caller typed and compares each one against the
//! parent directory's listing, byte for byte.

use std::ffi::{OsStr, OsString};
use std::path::{Component, Path, PathBuf};

use crate::case::CaseSensitivity;
use crate::error::{Error, Result};
use crate::filesystem::Filesystem;
use crate::outcome::{CaseMismatch, ResolutionOutcome};
use crate::path::{AnchoredPath, CanonicalPath, PathComponent};

/// Compares typed path components against on-disk entry names.
///
/// # Examples
///
/// ```
/// use watchroot::case::CaseChecker;
/// use watchroot::filesystem::MemoryFilesystem;
/// use watchroot::path::normalize::anchor;
/// use watchroot::{CanonicalPath, CaseSensitivity};
/// use std::path::{Path, PathBuf};
///
/// let fs = MemoryFilesystem::new(CaseSensitivity::Insensitive);
/// fs.create_dir_all("/tmp/FOO/bar");
///
/// let anchored = anchor(Path::new("/tmp/foo/bar"), Path::new("/")).unwrap();
/// let resolved = CanonicalPath::new(PathBuf::from("/tmp/FOO/bar")).unwrap();
///
/// let outcome = CaseChecker::new(&fs)
///     .check_case_consistency(&anchored, resolved, CaseSensitivity::Insensitive)
///     .unwrap();
/// let mismatch = outcome.mismatch().unwrap();
/// assert_eq!(mismatch.offending_component_path(), Path::new("/tmp/foo"));
/// ```
pub struct CaseChecker<'a> {
    fs: &'a dyn Filesystem,
}

impl<'a> CaseChecker<'a> {
    /// Create a checker over `fs`.
    #[must_use]
    pub fn new(fs: &'a dyn Filesystem) -> Self {
        Self { fs }
    }

    /// Verify that every typed component of `anchored` is stored on disk
    /// with exactly that spelling.
    ///
    /// `resolved` is the canonical path already obtained for the request; it
    /// is returned unchanged on success and reported on mismatch.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry on the walk cannot be examined
    /// (`PathNotFound`, `PermissionDenied` or `Io`). Such failures are never
    /// reported as a mismatch.
    pub fn check_case_consistency(
        &self,
        anchored: &AnchoredPath,
        resolved: CanonicalPath,
        sensitivity: CaseSensitivity,
    ) -> Result<ResolutionOutcome> {
        if sensitivity == CaseSensitivity::Sensitive {
            return Ok(ResolutionOutcome::Resolved(resolved));
        }

        let mut walk = anchored.anchor.clone();
        for component in anchored.literal.components() {
            let name = match component {
                Component::CurDir => continue,
                Component::Normal(name) => name,
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    walk.push(component);
                    continue;
                }
            };

            let parent = walk.clone();
            walk.push(name);

            if let Some(stored) = self.stored_name(&parent, &walk, name, sensitivity)? {
                if stored.as_os_str() == name {
                    continue;
                }
                return Ok(mismatch(anchored, resolved, walk, name, Some(stored)));
            }
            return Ok(mismatch(anchored, resolved, walk, name, None));
        }

        Ok(ResolutionOutcome::Resolved(resolved))
    }

    /// Find the listing entry for `name` in `parent`: the exact spelling when
    /// present, otherwise the first entry equal under `sensitivity`.
    fn stored_name(
        &self,
        parent: &Path,
        candidate: &Path,
        name: &OsStr,
        sensitivity: CaseSensitivity,
    ) -> Result<Option<OsString>> {
        self.fs
            .metadata(candidate)
            .map_err(|e| Error::from_io(e, candidate))?;

        let listing = self
            .fs
            .read_dir_names(parent)
            .map_err(|e| Error::from_io(e, parent))?;

        if let Some(exact) = listing.iter().find(|entry| entry.as_os_str() == name) {
            return Ok(Some(exact.clone()));
        }
        Ok(listing
            .into_iter()
            .find(|entry| sensitivity.names_match(entry, name)))
    }
}

fn mismatch(
    anchored: &AnchoredPath,
    resolved: CanonicalPath,
    offending: PathBuf,
    name: &OsStr,
    stored: Option<OsString>,
) -> ResolutionOutcome {
    log::debug!(
        "case mismatch at {}: requested {:?}, stored {:?}",
        offending.display(),
        name,
        stored
    );
    ResolutionOutcome::CaseMismatch(CaseMismatch::new(
        anchored.requested().to_path_buf(),
        resolved.into_path_buf(),
        offending,
        PathComponent::new(name, stored),
    ))
}
