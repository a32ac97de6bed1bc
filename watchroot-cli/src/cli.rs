//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{CompletionsCommand, ProbeCommand, ResolveCommand, ValidateCommand};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Resolve file-watch roots with strict case checking.
#[derive(Parser)]
#[command(name = "watchroot")]
#[command(version, about = "Resolve file-watch roots with strict case checking", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Directory holding the user config.yaml
    #[arg(long, value_name = "PATH", global = true, env = "WATCHROOT_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Resolve one or more watch roots
    Resolve(ResolveCommand),

    /// Report whether the filesystem holding a path is case-sensitive
    Probe(ProbeCommand),

    /// Validate a configuration file
    Validate(ValidateCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
