//! Case sensitivity as an injected capability.
//!
//! Whether a filesystem distinguishes `foo` from `FOO` depends on the volume
//! and its mount options, not just the operating system. The resolver asks a
//! [`CaseSensitivityProbe`] instead of consulting a platform table, so the
//! answer can be fixed by configuration, detected at runtime, or faked in
//! tests.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::filesystem::Filesystem;

/// How a filesystem compares entry names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseSensitivity {
    /// `foo` and `FOO` are distinct entries.
    Sensitive,
    /// `foo` and `FOO` name the same entry; the creation casing is kept.
    Insensitive,
}

impl CaseSensitivity {
    /// The usual behavior of the host platform's default filesystem.
    ///
    /// Only used when detection has nothing to go on.
    #[must_use]
    pub fn platform_default() -> Self {
        if cfg!(any(target_os = "macos", target_os = "ios", windows)) {
            Self::Insensitive
        } else {
            Self::Sensitive
        }
    }

    /// Whether two entry names refer to the same entry under these rules.
    ///
    /// # Examples
    ///
    /// ```
    /// use watchroot::CaseSensitivity;
    /// use std::ffi::OsStr;
    ///
    /// let foo = OsStr::new("foo");
    /// let upper = OsStr::new("FOO");
    /// assert!(CaseSensitivity::Insensitive.names_match(foo, upper));
    /// assert!(!CaseSensitivity::Sensitive.names_match(foo, upper));
    /// ```
    #[must_use]
    pub fn names_match(self, a: &OsStr, b: &OsStr) -> bool {
        match self {
            Self::Sensitive => a == b,
            Self::Insensitive => a == b || fold(a) == fold(b),
        }
    }
}

impl fmt::Display for CaseSensitivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensitive => write!(f, "sensitive"),
            Self::Insensitive => write!(f, "insensitive"),
        }
    }
}

fn fold(name: &OsStr) -> String {
    name.to_string_lossy().to_lowercase()
}

/// How case sensitivity is decided for a resolution.
///
/// # Examples
///
/// ```
/// use watchroot::CaseSensitivityMode;
///
/// assert_eq!(CaseSensitivityMode::parse("AUTO").unwrap(), CaseSensitivityMode::Auto);
/// assert_eq!(CaseSensitivityMode::Insensitive.to_string(), "insensitive");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum CaseSensitivityMode {
    /// Probe the filesystem that holds the requested root.
    #[default]
    Auto,
    /// Treat every filesystem as case-sensitive.
    Sensitive,
    /// Treat every filesystem as case-insensitive.
    Insensitive,
}

impl CaseSensitivityMode {
    /// Parses a mode from a string (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns a validation error if the string is not recognized.
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "sensitive" => Ok(Self::Sensitive),
            "insensitive" => Ok(Self::Insensitive),
            _ => Err(Error::Validation {
                field: "case_sensitivity".into(),
                message: format!("expected auto, sensitive or insensitive, got '{s}'"),
            }),
        }
    }

    /// Build the probe that implements this mode over `fs`.
    #[must_use]
    pub fn into_probe(self, fs: Arc<dyn Filesystem>) -> Arc<dyn CaseSensitivityProbe> {
        match self {
            Self::Auto => Arc::new(FilesystemProbe::new(fs)),
            Self::Sensitive => Arc::new(FixedCaseSensitivity(CaseSensitivity::Sensitive)),
            Self::Insensitive => Arc::new(FixedCaseSensitivity(CaseSensitivity::Insensitive)),
        }
    }
}

impl fmt::Display for CaseSensitivityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Sensitive => write!(f, "sensitive"),
            Self::Insensitive => write!(f, "insensitive"),
        }
    }
}

/// Answers whether the filesystem holding a path is case-sensitive.
pub trait CaseSensitivityProbe: Send + Sync {
    /// Determine the case behavior for the filesystem containing `canonical`.
    ///
    /// `canonical` is an existing, canonicalized path.
    ///
    /// # Errors
    ///
    /// Returns an error if the filesystem cannot be examined.
    fn case_sensitivity(&self, canonical: &Path) -> Result<CaseSensitivity>;
}

/// A probe that always gives the same answer.
///
/// # Examples
///
/// ```
/// use watchroot::{CaseSensitivity, CaseSensitivityProbe, FixedCaseSensitivity};
/// use std::path::Path;
///
/// let probe = FixedCaseSensitivity(CaseSensitivity::Insensitive);
/// assert_eq!(probe.case_sensitivity(Path::new("/any")).unwrap(), CaseSensitivity::Insensitive);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedCaseSensitivity(pub CaseSensitivity);

impl CaseSensitivityProbe for FixedCaseSensitivity {
    fn case_sensitivity(&self, _canonical: &Path) -> Result<CaseSensitivity> {
        Ok(self.0)
    }
}

/// Detects case sensitivity by looking the path up under flipped casing.
///
/// The deepest component of the canonical path that contains cased letters
/// is flipped (`Foo` becomes `fOO`). If the flipped sibling can be examined
/// but does not appear verbatim in the parent's listing, the filesystem
/// folded the name and is case-insensitive. If it does not exist, or exists
/// as a separately listed entry, the filesystem is case-sensitive.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::path::Path;
/// use watchroot::filesystem::MemoryFilesystem;
/// use watchroot::{CaseSensitivity, CaseSensitivityProbe, FilesystemProbe};
///
/// let fs = Arc::new(MemoryFilesystem::new(CaseSensitivity::Insensitive));
/// fs.create_dir_all("/Volumes/Data");
///
/// let probe = FilesystemProbe::new(fs);
/// assert_eq!(
///     probe.case_sensitivity(Path::new("/Volumes/Data")).unwrap(),
///     CaseSensitivity::Insensitive
/// );
/// ```
pub struct FilesystemProbe {
    fs: Arc<dyn Filesystem>,
}

impl FilesystemProbe {
    /// Create a probe over `fs`.
    #[must_use]
    pub fn new(fs: Arc<dyn Filesystem>) -> Self {
        Self { fs }
    }
}

impl fmt::Debug for FilesystemProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilesystemProbe").finish_non_exhaustive()
    }
}

impl CaseSensitivityProbe for FilesystemProbe {
    fn case_sensitivity(&self, canonical: &Path) -> Result<CaseSensitivity> {
        let mut candidate = canonical.to_path_buf();

        loop {
            let (Some(parent), Some(name)) = (candidate.parent(), candidate.file_name()) else {
                break;
            };
            let Some(flipped) = flip_case(name) else {
                candidate.pop();
                continue;
            };

            let flipped_path = parent.join(&flipped);
            return match self.fs.metadata(&flipped_path) {
                Ok(_) => {
                    let listing = self
                        .fs
                        .read_dir_names(parent)
                        .map_err(|e| Error::from_io(e, parent))?;
                    if listing.iter().any(|n| *n == flipped) {
                        Ok(CaseSensitivity::Sensitive)
                    } else {
                        log::debug!(
                            "{} is reachable as {}: case-insensitive",
                            candidate.display(),
                            flipped_path.display()
                        );
                        Ok(CaseSensitivity::Insensitive)
                    }
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    Ok(CaseSensitivity::Sensitive)
                }
                Err(e) => Err(Error::from_io(e, &flipped_path)),
            };
        }

        let fallback = CaseSensitivity::platform_default();
        log::debug!(
            "no cased component in {}, assuming {fallback}",
            canonical.display()
        );
        Ok(fallback)
    }
}

/// Swap the case of every character with a one-to-one case pair.
///
/// Characters whose other case expands (`ß` uppercases to `SS`) are kept, so
/// the flipped name always folds to the same key as the original. Returns
/// `None` when nothing changes.
fn flip_case(name: &OsStr) -> Option<OsString> {
    let text = name.to_str()?;
    let flipped: String = text.chars().map(swap_char).collect();
    let same_entry = fold(OsStr::new(&flipped)) == fold(name);
    (flipped != text && same_entry).then(|| OsString::from(flipped))
}

fn swap_char(c: char) -> char {
    let swapped = if c.is_uppercase() {
        single(c.to_lowercase())
    } else {
        single(c.to_uppercase())
    };
    match swapped {
        Some(other) if other != c => {
            let back = if other.is_uppercase() {
                single(other.to_lowercase())
            } else {
                single(other.to_uppercase())
            };
            if back == Some(c) {
                other
            } else {
                c
            }
        }
        _ => c,
    }
}

fn single(mut chars: impl Iterator<Item = char>) -> Option<char> {
    let first = chars.next()?;
    chars.next().is_none().then_some(first)
}
