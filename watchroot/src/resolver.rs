//! Watch-root resolution.
//!
//! The [`RootResolver`] composes the two stages of resolving a root: the
//! [`Canonicalizer`] asks the filesystem where the request points, then the
//! [`CaseChecker`] verifies that the caller spelled every component the way
//! it is stored. Each attempt is synchronous and independent of every other
//! attempt, so a single resolver can be shared freely across threads.

use std::fmt;
use std::sync::Arc;

use rayon::prelude::*;

use crate::case::{CaseChecker, CaseSensitivity, CaseSensitivityMode, CaseSensitivityProbe};
use crate::config::schema::{Config, DEFAULT_MAX_PARALLEL};
use crate::error::{Error, Result};
use crate::filesystem::{Filesystem, OsFilesystem};
use crate::outcome::ResolutionOutcome;
use crate::path::{CanonicalPath, Canonicalizer, WatchRequest};

/// Progress of a single resolution attempt.
///
/// ```text
/// Start -> Canonicalizing -> CanonicalizeFailed
///                         -> Canonicalized -> CheckingCase -> Mismatch
///                                                          -> Resolved
///                                                          -> CheckFailed
/// ```
///
/// Terminal stages accept no further transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionStage {
    /// Nothing has happened yet.
    Start,
    /// Asking the filesystem for the canonical path.
    Canonicalizing,
    /// Canonicalization (or the directory check) failed.
    CanonicalizeFailed,
    /// A canonical path is available.
    Canonicalized,
    /// Comparing typed components against the filesystem.
    CheckingCase,
    /// The check found a component spelled differently on disk.
    Mismatch,
    /// The root resolved.
    Resolved,
    /// The filesystem could not be examined while checking.
    CheckFailed,
}

impl ResolutionStage {
    /// True for stages that end an attempt.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::CanonicalizeFailed | Self::Mismatch | Self::Resolved | Self::CheckFailed
        )
    }

    /// Whether `next` may follow `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use watchroot::ResolutionStage;
    ///
    /// assert!(ResolutionStage::Start.can_transition_to(ResolutionStage::Canonicalizing));
    /// assert!(!ResolutionStage::Resolved.can_transition_to(ResolutionStage::CheckingCase));
    /// ```
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Start, Self::Canonicalizing)
                | (
                    Self::Canonicalizing,
                    Self::CanonicalizeFailed | Self::Canonicalized
                )
                | (Self::Canonicalized, Self::CheckingCase)
                | (
                    Self::CheckingCase,
                    Self::Mismatch | Self::Resolved | Self::CheckFailed
                )
        )
    }
}

impl fmt::Display for ResolutionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::Canonicalizing => "canonicalizing",
            Self::CanonicalizeFailed => "canonicalize-failed",
            Self::Canonicalized => "canonicalized",
            Self::CheckingCase => "checking-case",
            Self::Mismatch => "mismatch",
            Self::Resolved => "resolved",
            Self::CheckFailed => "check-failed",
        };
        f.write_str(name)
    }
}

/// Tracks one attempt through its stages.
struct Attempt<'r> {
    request: &'r WatchRequest,
    stage: ResolutionStage,
}

impl<'r> Attempt<'r> {
    fn new(request: &'r WatchRequest) -> Self {
        Self {
            request,
            stage: ResolutionStage::Start,
        }
    }

    fn advance(&mut self, next: ResolutionStage) {
        debug_assert!(
            self.stage.can_transition_to(next),
            "invalid transition {} -> {next}",
            self.stage
        );
        log::debug!("{}: {} -> {next}", self.request, self.stage);
        self.stage = next;
    }

    /// Record the terminal stage matching `result`.
    fn finish<T>(&mut self, failed: ResolutionStage, result: Result<T>) -> Result<T> {
        if result.is_err() {
            self.advance(failed);
        }
        result
    }
}

/// Resolves watch requests to trustworthy canonical roots.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use watchroot::filesystem::MemoryFilesystem;
/// use watchroot::{CaseSensitivity, FixedCaseSensitivity, RootResolver, WatchRequest};
///
/// let fs = Arc::new(MemoryFilesystem::new(CaseSensitivity::Insensitive));
/// fs.create_dir_all("/tmp/FOO/bar");
///
/// let resolver = RootResolver::new(
///     fs,
///     Arc::new(FixedCaseSensitivity(CaseSensitivity::Insensitive)),
/// );
///
/// let ok = resolver.resolve(&WatchRequest::new("/tmp/FOO/bar")).unwrap();
/// assert!(ok.is_resolved());
///
/// let err = resolver.resolve_root(&WatchRequest::new("/tmp/foo/bar")).unwrap_err();
/// assert!(err.is_case_mismatch());
/// ```
#[derive(Clone)]
pub struct RootResolver {
    fs: Arc<dyn Filesystem>,
    probe: Arc<dyn CaseSensitivityProbe>,
    require_directory: bool,
    max_parallel: usize,
}

impl RootResolver {
    /// Create a resolver over `fs`, deciding case sensitivity with `probe`.
    #[must_use]
    pub fn new(fs: Arc<dyn Filesystem>, probe: Arc<dyn CaseSensitivityProbe>) -> Self {
        Self {
            fs,
            probe,
            require_directory: true,
            max_parallel: DEFAULT_MAX_PARALLEL,
        }
    }

    /// Create a resolver over the real filesystem from configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::from_config_with_fs(config, Arc::new(OsFilesystem))
    }

    /// Create a resolver over `fs` from configuration.
    #[must_use]
    pub fn from_config_with_fs(config: &Config, fs: Arc<dyn Filesystem>) -> Self {
        let probe = config
            .case_sensitivity_or_default()
            .into_probe(Arc::clone(&fs));
        Self::new(fs, probe)
            .with_require_directory(config.require_directory_or_default())
            .with_max_parallel(config.max_parallel_or_default())
    }

    /// Whether roots that are not directories are rejected (default true).
    #[must_use]
    pub fn with_require_directory(mut self, require: bool) -> Self {
        self.require_directory = require;
        self
    }

    /// Maximum worker threads used by [`RootResolver::resolve_all`].
    ///
    /// Values below 1 are treated as 1.
    #[must_use]
    pub fn with_max_parallel(mut self, max_parallel: usize) -> Self {
        self.max_parallel = max_parallel.max(1);
        self
    }

    /// The filesystem this resolver reads.
    #[must_use]
    pub fn filesystem(&self) -> &dyn Filesystem {
        self.fs.as_ref()
    }

    /// Resolve a request.
    ///
    /// A case mismatch is a successful answer and comes back as
    /// [`ResolutionOutcome::CaseMismatch`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path does not exist (`PathNotFound`)
    /// - Permission is denied (`PermissionDenied`)
    /// - The root is not a directory and directories are required (`NotADirectory`)
    /// - The request cannot be anchored (`InvalidPath`)
    /// - Any other I/O error occurs (`Io`)
    pub fn resolve(&self, request: &WatchRequest) -> Result<ResolutionOutcome> {
        let mut attempt = Attempt::new(request);
        let canonicalizer = Canonicalizer::new(self.fs.as_ref());

        attempt.advance(ResolutionStage::Canonicalizing);
        let canonicalized = canonicalizer.anchor(request).and_then(|anchored| {
            let canonical = canonicalizer.canonicalize_anchored(&anchored)?;
            self.ensure_directory(&canonical)?;
            Ok((anchored, canonical))
        });
        let (anchored, canonical) =
            attempt.finish(ResolutionStage::CanonicalizeFailed, canonicalized)?;
        attempt.advance(ResolutionStage::Canonicalized);

        attempt.advance(ResolutionStage::CheckingCase);
        let checked = self.probe.case_sensitivity(canonical.as_path()).and_then(|sensitivity| {
            log::debug!("{request}: filesystem is case-{sensitivity}");
            CaseChecker::new(self.fs.as_ref()).check_case_consistency(
                &anchored,
                canonical,
                sensitivity,
            )
        });
        let outcome = attempt.finish(ResolutionStage::CheckFailed, checked)?;

        attempt.advance(if outcome.is_resolved() {
            ResolutionStage::Resolved
        } else {
            ResolutionStage::Mismatch
        });
        Ok(outcome)
    }

    /// Resolve a request, treating a case mismatch as an error.
    ///
    /// # Errors
    ///
    /// Everything [`RootResolver::resolve`] returns, plus
    /// [`Error::RootResolve`] carrying the mismatch diagnostic.
    pub fn resolve_root(&self, request: &WatchRequest) -> Result<CanonicalPath> {
        self.resolve(request)?.into_result()
    }

    /// Resolve a batch of requests concurrently.
    ///
    /// At most `max_parallel` attempts run at once. Results are returned in
    /// request order, one per request.
    pub fn resolve_all(&self, requests: &[WatchRequest]) -> Vec<Result<ResolutionOutcome>> {
        let workers = self.max_parallel.min(requests.len());
        if workers <= 1 {
            return requests.iter().map(|r| self.resolve(r)).collect();
        }

        let pool = match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
            Ok(pool) => pool,
            Err(e) => {
                log::warn!("falling back to sequential resolution: {e}");
                return requests.iter().map(|r| self.resolve(r)).collect();
            }
        };
        pool.install(|| requests.par_iter().map(|r| self.resolve(r)).collect())
    }

    /// Report the case behavior of the filesystem holding `request`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be canonicalized or the
    /// filesystem cannot be examined.
    pub fn case_sensitivity(&self, request: &WatchRequest) -> Result<CaseSensitivity> {
        let canonical = Canonicalizer::new(self.fs.as_ref()).canonicalize(request)?;
        self.probe.case_sensitivity(canonical.as_path())
    }

    fn ensure_directory(&self, canonical: &CanonicalPath) -> Result<()> {
        if !self.require_directory {
            return Ok(());
        }
        let kind = self
            .fs
            .metadata(canonical.as_path())
            .map_err(|e| Error::from_io(e, canonical.as_path()))?;
        if kind.is_dir() {
            Ok(())
        } else {
            Err(Error::NotADirectory {
                path: canonical.as_path().to_path_buf(),
            })
        }
    }
}

impl Default for RootResolver {
    fn default() -> Self {
        let fs: Arc<dyn Filesystem> = Arc::new(OsFilesystem);
        let probe = CaseSensitivityMode::Auto.into_probe(Arc::clone(&fs));
        Self::new(fs, probe)
    }
}

impl fmt::Debug for RootResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RootResolver")
            .field("require_directory", &self.require_directory)
            .field("max_parallel", &self.max_parallel)
            .finish_non_exhaustive()
    }
}
