//! Output formatter implementations.

use crate::outcome::ResolutionOutcome;
use crate::{Error, Result};

use super::{EntryResult, OutputFormatter, ResolutionReport};

/// Formatter for JSON output.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &ResolutionReport) -> Result<String> {
        serde_json::to_string_pretty(report).map_err(|e| Error::Validation {
            field: "json_output".to_string(),
            message: format!("failed to serialize to JSON: {e}"),
        })
    }
}

/// Formatter for YAML output.
pub struct YamlFormatter;

impl OutputFormatter for YamlFormatter {
    fn format(&self, report: &ResolutionReport) -> Result<String> {
        serde_yaml::to_string(report)
            .map(|s| s.trim_end().to_string())
            .map_err(|e| Error::Validation {
                field: "yaml_output".to_string(),
                message: format!("failed to serialize to YAML: {e}"),
            })
    }
}

/// Formatter for human-readable output.
///
/// Prints one canonical path per resolved root. Mismatches and errors are
/// left out; callers report those on stderr.
pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn format(&self, report: &ResolutionReport) -> Result<String> {
        let lines: Vec<String> = report
            .roots
            .iter()
            .filter_map(|entry| match &entry.result {
                EntryResult::Outcome(ResolutionOutcome::Resolved(path)) => Some(path.to_string()),
                _ => None,
            })
            .collect();
        Ok(lines.join("\n"))
    }
}
