#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # watchroot
//!
//! A library for resolving the root directory of a file watch.
//!
//! Given a path as a user typed it, watchroot determines the canonical
//! on-disk path a watcher should monitor. On case-insensitive filesystems it
//! additionally verifies that every typed component matches the casing
//! stored on disk, and refuses the root otherwise: a watcher keyed on
//! `/tmp/foo` would never match events the OS reports under `/tmp/FOO`.
//!
//! ## Core Types
//!
//! - [`RootResolver`]: Canonicalization followed by strict case checking
//! - [`WatchRequest`] and [`CanonicalPath`]: Input and output paths
//! - [`ResolutionOutcome`] and [`CaseMismatch`]: Resolution results
//! - [`CaseSensitivityProbe`]: Injected knowledge of the filesystem's case rules
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use std::sync::Arc;
//! use std::path::Path;
//! use watchroot::filesystem::MemoryFilesystem;
//! use watchroot::{CaseSensitivity, FixedCaseSensitivity, RootResolver, WatchRequest};
//!
//! let fs = Arc::new(MemoryFilesystem::new(CaseSensitivity::Insensitive));
//! fs.create_dir_all("/home/dev/Project");
//!
//! let resolver = RootResolver::new(
//!     fs,
//!     Arc::new(FixedCaseSensitivity(CaseSensitivity::Insensitive)),
//! );
//!
//! let outcome = resolver.resolve(&WatchRequest::new("/home/dev/project")).unwrap();
//! let mismatch = outcome.mismatch().unwrap();
//! assert_eq!(mismatch.offending_component_path(), Path::new("/home/dev/project"));
//! assert_eq!(mismatch.resolved_path(), Path::new("/home/dev/Project"));
//! ```

pub mod case;
pub mod config;
pub mod error;
pub mod filesystem;
pub mod logging;
pub mod outcome;
pub mod output;
pub mod path;
pub mod resolver;

// Re-export key types at crate root for convenience
pub use case::{
    CaseChecker, CaseSensitivity, CaseSensitivityMode, CaseSensitivityProbe, FilesystemProbe,
    FixedCaseSensitivity,
};
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use outcome::{CaseMismatch, ResolutionOutcome};
pub use path::{CanonicalPath, PathComponent, WatchRequest};
pub use resolver::{ResolutionStage, RootResolver};
