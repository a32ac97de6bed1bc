//! Command to resolve watch roots.

use crate::error::CliError;
use crate::utils::{build_resolver, load_configuration, GlobalOptions};
use clap::Args;
use std::path::PathBuf;
use watchroot::config::OutputFormat;
use watchroot::output::ResolutionReport;
use watchroot::{CaseSensitivityMode, Config, Error, ResolutionOutcome, WatchRequest};

/// Resolve one or more watch roots.
///
/// Each root is canonicalized and then checked component by component
/// against the spelling stored on disk.
#[derive(Args)]
pub struct ResolveCommand {
    /// Roots to resolve
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// How case sensitivity is decided
    #[arg(long, value_enum)]
    pub case_sensitivity: Option<CaseSensitivityMode>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Accept roots that resolve to regular files
    #[arg(long)]
    pub allow_files: bool,

    /// Maximum number of roots resolved at once
    #[arg(long, value_name = "N")]
    pub max_parallel: Option<usize>,
}

impl ResolveCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let overrides = Config {
            case_sensitivity: self.case_sensitivity,
            require_directory: self.allow_files.then_some(false),
            max_parallel: self.max_parallel,
            output_format: self.format,
        };
        let config = load_configuration(global, overrides)?;
        let resolver = build_resolver(global, &config);

        let requests: Vec<WatchRequest> = self.paths.into_iter().map(WatchRequest::new).collect();
        let results = resolver.resolve_all(&requests);

        let report = ResolutionReport::from_results(&requests, &results);
        let output = config
            .output_format_or_default()
            .create_formatter()
            .format(&report)?;
        if !output.is_empty() {
            println!("{output}");
        }

        match first_failure(&requests, results) {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }
}

/// Pick the error that decides the exit status.
///
/// A case mismatch outranks every other failure. Failures not chosen are
/// reported on stderr.
fn first_failure(
    requests: &[WatchRequest],
    results: Vec<Result<ResolutionOutcome, Error>>,
) -> Option<Error> {
    let mut failures: Vec<(&WatchRequest, Error)> = requests
        .iter()
        .zip(results)
        .filter_map(|(request, result)| match result {
            Ok(ResolutionOutcome::Resolved(_)) => None,
            Ok(ResolutionOutcome::CaseMismatch(mismatch)) => Some((request, mismatch.into())),
            Err(e) => Some((request, e)),
        })
        .collect();

    let primary = failures
        .iter()
        .position(|(_, e)| e.is_case_mismatch())
        .or_else(|| (!failures.is_empty()).then_some(0))?;
    let (_, primary) = failures.remove(primary);

    for (request, e) in failures {
        eprintln!("Error: {request}: {e}");
    }
    Some(primary)
}
