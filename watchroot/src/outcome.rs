//! Resolution outcomes.
//!
//! A resolution attempt that gets past canonicalization ends in exactly one
//! of two states: the root resolved, or the request's casing disagrees with
//! the filesystem. A mismatch is a structural answer, not a fault, so it is
//! returned inside `Ok` and carries everything a caller needs to explain it.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::path::{CanonicalPath, PathComponent};

/// The result of resolving a watch root.
///
/// # Examples
///
/// ```
/// use watchroot::{CanonicalPath, ResolutionOutcome};
/// use std::path::PathBuf;
///
/// let outcome = ResolutionOutcome::Resolved(
///     CanonicalPath::new(PathBuf::from("/srv/data")).unwrap(),
/// );
/// assert!(outcome.is_resolved());
/// assert!(outcome.into_result().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// Every typed component matches the filesystem exactly.
    Resolved(CanonicalPath),
    /// A typed component differs from the stored name.
    CaseMismatch(CaseMismatch),
}

impl ResolutionOutcome {
    /// True for the `Resolved` variant.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// The canonical path, whichever variant this is.
    #[must_use]
    pub fn resolved_path(&self) -> &Path {
        match self {
            Self::Resolved(path) => path.as_path(),
            Self::CaseMismatch(mismatch) => mismatch.resolved_path(),
        }
    }

    /// The mismatch details, if any.
    #[must_use]
    pub fn mismatch(&self) -> Option<&CaseMismatch> {
        match self {
            Self::Resolved(_) => None,
            Self::CaseMismatch(mismatch) => Some(mismatch),
        }
    }

    /// Convert into a `Result`, turning a mismatch into [`crate::Error::RootResolve`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::RootResolve`] for the `CaseMismatch` variant.
    pub fn into_result(self) -> crate::Result<CanonicalPath> {
        match self {
            Self::Resolved(path) => Ok(path),
            Self::CaseMismatch(mismatch) => Err(mismatch.into()),
        }
    }
}

impl Serialize for ResolutionOutcome {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        match self {
            Self::Resolved(path) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("status", "resolved")?;
                map.serialize_entry("resolved", path)?;
                map.end()
            }
            Self::CaseMismatch(mismatch) => {
                let mut map = serializer.serialize_map(Some(6))?;
                map.serialize_entry("status", "case_mismatch")?;
                map.serialize_entry("requested", &mismatch.requested_path.to_string_lossy())?;
                map.serialize_entry("resolved", &mismatch.resolved_path.to_string_lossy())?;
                map.serialize_entry(
                    "offending_component",
                    &mismatch.offending_component_path.to_string_lossy(),
                )?;
                map.serialize_entry("component", &mismatch.component)?;
                map.serialize_entry("message", &mismatch.to_string())?;
                map.end()
            }
        }
    }
}

/// A request whose casing disagrees with the filesystem.
///
/// `offending_component_path` is the shortest prefix of the request at which
/// the stored name differs; deeper components were not examined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseMismatch {
    requested_path: PathBuf,
    resolved_path: PathBuf,
    offending_component_path: PathBuf,
    component: PathComponent,
}

impl CaseMismatch {
    /// Describe a mismatch.
    #[must_use]
    pub fn new(
        requested_path: PathBuf,
        resolved_path: PathBuf,
        offending_component_path: PathBuf,
        component: PathComponent,
    ) -> Self {
        Self {
            requested_path,
            resolved_path,
            offending_component_path,
            component,
        }
    }

    /// The path as the caller typed it.
    #[must_use]
    pub fn requested_path(&self) -> &Path {
        &self.requested_path
    }

    /// The canonical path the filesystem reported.
    #[must_use]
    pub fn resolved_path(&self) -> &Path {
        &self.resolved_path
    }

    /// The request prefix ending at the first mismatching component.
    #[must_use]
    pub fn offending_component_path(&self) -> &Path {
        &self.offending_component_path
    }

    /// Requested and stored spelling of the offending component.
    #[must_use]
    pub fn component(&self) -> &PathComponent {
        &self.component
    }
}

impl fmt::Display for CaseMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let requested = self.requested_path.display();
        write!(
            f,
            "unable to resolve root {requested}: \"{requested}\" resolved to \"{}\" \
             but we were unable to examine \"{requested}\" using strict case sensitive \
             rules.  Please check each component of the path and make sure that that \
             path exactly matches the correct case of the files on your filesystem.",
            self.resolved_path.display()
        )
    }
}

impl Serialize for CaseMismatch {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("CaseMismatch", 5)?;
        state.serialize_field("requested", &self.requested_path.to_string_lossy())?;
        state.serialize_field("resolved", &self.resolved_path.to_string_lossy())?;
        state.serialize_field(
            "offending_component",
            &self.offending_component_path.to_string_lossy(),
        )?;
        state.serialize_field("component", &self.component)?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}
