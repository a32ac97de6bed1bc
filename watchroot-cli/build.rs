//! Build script for watchroot-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
fn build_cli() -> Command {
    Command::new("watchroot")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Resolve file-watch roots with strict case checking")
        .long_about(
            "Resolve file-watch roots to canonical paths, rejecting any root whose \
             spelling does not exactly match the case stored on disk",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config-dir")
                .long("config-dir")
                .help("Directory holding the user config.yaml")
                .value_name("PATH")
                .global(true)
                .env("WATCHROOT_CONFIG_DIR"),
        )
        .subcommands(vec![
            Command::new("resolve")
                .about("Resolve one or more watch roots")
                .long_about("Canonicalize each root and check every component's case against the filesystem"),
            Command::new("probe")
                .about("Report whether the filesystem holding a path is case-sensitive")
                .long_about("Print `sensitive` or `insensitive` for the filesystem holding a path"),
            Command::new("validate")
                .about("Validate a configuration file")
                .long_about("Check a watchroot configuration file for errors"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() -> io::Result<()> {
    let out_dir = std::env::var("OUT_DIR").map_err(io::Error::other)?;
    let man_dir = PathBuf::from(out_dir).join("man");
    fs::create_dir_all(&man_dir)?;

    let mut buffer = Vec::new();
    Man::new(build_cli()).render(&mut buffer)?;
    fs::write(man_dir.join("watchroot.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
