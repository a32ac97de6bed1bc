//! Case sensitivity detection and strict case checking.
//!
//! # Key Concepts
//!
//! ## Sensitivity
//!
//! Whether `foo` and `FOO` name the same entry is a property of the volume.
//! It is supplied to the resolver through a [`CaseSensitivityProbe`], chosen
//! by [`CaseSensitivityMode`].
//!
//! ## Checking
//!
//! On a case-insensitive volume the [`CaseChecker`] compares every typed
//! component against its parent's directory listing and reports the first
//! component whose spelling differs.

mod checker;
mod sensitivity;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use checker::CaseChecker;
pub use sensitivity::{
    CaseSensitivity, CaseSensitivityMode, CaseSensitivityProbe, FilesystemProbe,
    FixedCaseSensitivity,
};
