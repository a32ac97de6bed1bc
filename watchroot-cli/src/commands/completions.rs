//! Shell completion generation command.
//!
//! This module provides the `completions` command which generates shell completion
//! scripts for bash, zsh, fish, and PowerShell.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use std::io;

/// Name of the installed binary.
const BIN_NAME: &str = "watchroot";

/// Generate shell completion scripts
#[derive(Parser)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut cmd = Cli::command();

        if !global.quiet {
            for line in install_hint(self.shell) {
                eprintln!("# {line}");
            }
            eprintln!();
        }

        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());

        Ok(())
    }
}

fn install_hint(shell: Shell) -> Vec<String> {
    let mut lines = vec![
        format!("Generating {shell} completion script"),
        "Run the following command to enable completions:".to_string(),
    ];
    match shell {
        Shell::Bash => lines.extend([
            format!("  {BIN_NAME} completions bash > ~/.local/share/bash-completion/completions/{BIN_NAME}"),
            "Or source it directly in ~/.bashrc:".to_string(),
            format!("  eval \"$({BIN_NAME} completions bash)\""),
        ]),
        Shell::Zsh => lines.extend([
            format!("  {BIN_NAME} completions zsh > ~/.zsh/completions/_{BIN_NAME}"),
            "Make sure ~/.zsh/completions is in your $fpath".to_string(),
        ]),
        Shell::Fish => lines.extend([
            format!("  {BIN_NAME} completions fish > ~/.config/fish/completions/{BIN_NAME}.fish"),
            "Or add to config.fish:".to_string(),
            format!("  {BIN_NAME} completions fish | source"),
        ]),
        Shell::PowerShell => lines.extend([
            format!("  {BIN_NAME} completions powershell > $PROFILE"),
        ]),
        _ => {}
    }
    lines
}
