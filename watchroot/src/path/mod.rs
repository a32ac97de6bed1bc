//! Watch request types and canonicalization.
//!
//! # Key Concepts
//!
//! ## Anchoring
//!
//! A request is split into an anchor the caller did not type (filesystem
//! root, home directory, or working directory) and the literal components
//! the caller did type. See [`normalize::anchor`].
//!
//! ## Canonicalization
//!
//! The [`Canonicalizer`] asks the filesystem for the absolute,
//! symlink-resolved form of the request. It trusts the filesystem's spelling
//! of each component, which on a case-insensitive volume may differ from
//! the request.
//!
//! # Examples
//!
//! ```no_run
//! use watchroot::filesystem::OsFilesystem;
//! use watchroot::path::Canonicalizer;
//! use watchroot::WatchRequest;
//!
//! let canonical = Canonicalizer::new(&OsFilesystem)
//!     .canonicalize(&WatchRequest::new("."))
//!     .unwrap();
//! assert!(canonical.as_path().is_absolute());
//! ```

pub mod canonicalize;
pub mod normalize;
mod types;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types
pub use canonicalize::Canonicalizer;
pub use normalize::AnchoredPath;
pub use types::{CanonicalPath, PathComponent, WatchRequest};
