//! Output formatting for resolution reports.
//!
//! A [`ResolutionReport`] collects the result of every request in a batch.
//! Formatters render it for people (one resolved root per line) or for
//! programs (JSON or YAML documents carrying the full diagnostic).

mod formatters;

use serde::Serialize;

use crate::config::OutputFormat;
use crate::outcome::ResolutionOutcome;
use crate::path::WatchRequest;
use crate::Result;

pub use formatters::{HumanFormatter, JsonFormatter, YamlFormatter};

/// Trait for rendering a resolution report.
pub trait OutputFormatter {
    /// Format the report into a string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn format(&self, report: &ResolutionReport) -> Result<String>;
}

impl OutputFormat {
    /// Create a formatter for this output format.
    #[must_use]
    pub fn create_formatter(&self) -> Box<dyn OutputFormatter> {
        match self {
            Self::Human => Box::new(HumanFormatter),
            Self::Json => Box::new(JsonFormatter),
            Self::Yaml => Box::new(YamlFormatter),
        }
    }
}

/// What happened to one request.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum EntryResult {
    /// Resolution completed (resolved or mismatched).
    Outcome(ResolutionOutcome),
    /// Resolution failed before an outcome was reached.
    Failed {
        /// Always `"error"`.
        status: &'static str,
        /// Display form of the error.
        error: String,
    },
}

/// One request and its result.
#[derive(Debug, Serialize)]
pub struct ReportEntry {
    /// The request as typed.
    pub request: String,
    /// The result of resolving it.
    #[serde(flatten)]
    pub result: EntryResult,
}

/// The results of a batch, in request order.
///
/// # Examples
///
/// ```
/// use watchroot::output::ResolutionReport;
/// use watchroot::{CanonicalPath, ResolutionOutcome, WatchRequest};
/// use std::path::PathBuf;
///
/// let mut report = ResolutionReport::default();
/// report.push(
///     &WatchRequest::new("/srv"),
///     &Ok(ResolutionOutcome::Resolved(CanonicalPath::new(PathBuf::from("/srv")).unwrap())),
/// );
/// assert!(report.all_resolved());
/// ```
#[derive(Debug, Default, Serialize)]
pub struct ResolutionReport {
    /// Entries in request order.
    pub roots: Vec<ReportEntry>,
}

impl ResolutionReport {
    /// Build a report from requests and their results, pairwise.
    #[must_use]
    pub fn from_results(
        requests: &[WatchRequest],
        results: &[Result<ResolutionOutcome>],
    ) -> Self {
        let mut report = Self::default();
        for (request, result) in requests.iter().zip(results) {
            report.push(request, result);
        }
        report
    }

    /// Append the result for `request`.
    pub fn push(&mut self, request: &WatchRequest, result: &Result<ResolutionOutcome>) {
        let result = match result {
            Ok(outcome) => EntryResult::Outcome(outcome.clone()),
            Err(e) => EntryResult::Failed {
                status: "error",
                error: e.to_string(),
            },
        };
        self.roots.push(ReportEntry {
            request: request.to_string(),
            result,
        });
    }

    /// True when every entry resolved.
    #[must_use]
    pub fn all_resolved(&self) -> bool {
        self.roots
            .iter()
            .all(|e| matches!(&e.result, EntryResult::Outcome(o) if o.is_resolved()))
    }
}
