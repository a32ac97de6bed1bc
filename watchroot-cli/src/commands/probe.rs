//! Command to report the case behavior of a filesystem.

use crate::error::CliError;
use crate::utils::{build_resolver, load_configuration, GlobalOptions};
use clap::Args;
use std::path::PathBuf;
use watchroot::{CaseSensitivityMode, Config, WatchRequest};

/// Report whether the filesystem holding a path is case-sensitive.
#[derive(Args)]
pub struct ProbeCommand {
    /// Path to examine (defaults to the current directory)
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// How case sensitivity is decided
    #[arg(long, value_enum)]
    pub case_sensitivity: Option<CaseSensitivityMode>,
}

impl ProbeCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let overrides = Config {
            case_sensitivity: self.case_sensitivity,
            ..Default::default()
        };
        let config = load_configuration(global, overrides)?;
        let resolver = build_resolver(global, &config);

        let sensitivity = resolver.case_sensitivity(&WatchRequest::new(self.path))?;
        println!("{sensitivity}");
        Ok(())
    }
}
