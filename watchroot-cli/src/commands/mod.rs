//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `resolve`: Resolve watch roots with strict case checking
//! - `probe`: Report the case behavior of a path's filesystem
//! - `validate`: Validate a configuration file
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod probe;
pub mod resolve;
pub mod validate;

pub use completions::CompletionsCommand;
pub use probe::ProbeCommand;
pub use resolve::ResolveCommand;
pub use validate::ValidateCommand;
