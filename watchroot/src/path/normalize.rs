//! Path anchoring functions.
//!
//! A watch request is split into an *anchor* the caller did not spell out
//! (the filesystem root, the home directory behind `~`, or the working
//! directory for relative paths) and the *literal* components the caller
//! actually typed. Only the literal part is subject to strict case checks.

use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// A request split into its implicit anchor and its typed components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchoredPath {
    /// Where the literal components start from.
    pub anchor: PathBuf,
    /// The components as typed, relative to `anchor`.
    pub literal: PathBuf,
    requested: PathBuf,
}

impl AnchoredPath {
    /// The request as the caller spelled it, after anchoring.
    ///
    /// Trailing separators and `.` components survive here so diagnostics
    /// echo what was typed.
    #[must_use]
    pub fn requested(&self) -> &Path {
        &self.requested
    }

    /// The full path handed to the filesystem.
    #[must_use]
    pub fn joined(&self) -> PathBuf {
        if self.literal.as_os_str().is_empty() {
            self.anchor.clone()
        } else {
            self.anchor.join(&self.literal)
        }
    }
}

/// Expand tilde (~) to the home directory.
///
/// This function handles `~` and `~/path` but does not support `~user` syntax.
///
/// # Errors
///
/// Returns an error if:
/// - The home directory cannot be determined
/// - The path uses `~user` syntax (not supported)
///
/// # Examples
///
/// ```
/// use watchroot::path::normalize::expand_tilde;
/// use std::path::Path;
///
/// let expanded = expand_tilde(Path::new("~/project")).unwrap();
/// assert!(expanded.is_absolute());
/// assert!(expanded.ends_with("project"));
///
/// // Leaves other paths unchanged
/// let expanded = expand_tilde(Path::new("/absolute")).unwrap();
/// assert_eq!(expanded, Path::new("/absolute"));
/// ```
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    match split_tilde(path)? {
        Some((home, rest)) if rest.as_os_str().is_empty() => Ok(home),
        Some((home, rest)) => Ok(home.join(rest)),
        None => Ok(path.to_path_buf()),
    }
}

/// Split a `~`-prefixed path into the home directory and the remainder.
fn split_tilde(path: &Path) -> Result<Option<(PathBuf, PathBuf)>> {
    let mut components = path.components();
    let Some(Component::Normal(first)) = components.next() else {
        return Ok(None);
    };
    let Some(first) = first.to_str() else {
        return Ok(None);
    };
    if !first.starts_with('~') {
        return Ok(None);
    }
    if first != "~" {
        return Err(Error::InvalidPath {
            path: path.to_path_buf(),
            reason: "~user syntax is not supported; use ~ or ~/path".to_string(),
        });
    }

    let home = home::home_dir().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "Cannot determine home directory".to_string(),
    })?;
    Ok(Some((home, components.as_path().to_path_buf())))
}

/// Split `path` into the anchor it is relative to and its literal components.
///
/// - `~` and `~/rest` anchor at the home directory.
/// - Rooted paths anchor at their root (and Windows prefix).
/// - Everything else anchors at `base`.
///
/// # Errors
///
/// Returns an error if tilde expansion fails.
///
/// # Examples
///
/// ```
/// use watchroot::path::normalize::anchor;
/// use std::path::Path;
///
/// let anchored = anchor(Path::new("src/app"), Path::new("/work")).unwrap();
/// assert_eq!(anchored.anchor, Path::new("/work"));
/// assert_eq!(anchored.literal, Path::new("src/app"));
/// assert_eq!(anchored.joined(), Path::new("/work/src/app"));
/// ```
pub fn anchor(path: &Path, base: &Path) -> Result<AnchoredPath> {
    if let Some((home, rest)) = split_tilde(path)? {
        let requested = if rest.as_os_str().is_empty() {
            home.clone()
        } else {
            home.join(&rest)
        };
        return Ok(AnchoredPath {
            anchor: home,
            literal: rest,
            requested,
        });
    }

    if path.has_root() {
        let mut root = PathBuf::new();
        let mut literal = PathBuf::new();
        for component in path.components() {
            match component {
                Component::Prefix(_) | Component::RootDir => root.push(component),
                other => literal.push(other),
            }
        }
        return Ok(AnchoredPath {
            anchor: root,
            literal,
            requested: path.to_path_buf(),
        });
    }

    Ok(AnchoredPath {
        anchor: base.to_path_buf(),
        literal: path.to_path_buf(),
        requested: base.join(path),
    })
}
