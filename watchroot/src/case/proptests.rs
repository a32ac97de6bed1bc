//! Property-based tests for case checking.

use super::{CaseChecker, CaseSensitivity};
use crate::filesystem::{Filesystem, MemoryFilesystem};
use crate::path::normalize::anchor;
use crate::path::CanonicalPath;
use proptest::prelude::*;
use std::path::{Path, PathBuf};

// Mixed-case names, distinct enough to avoid sibling collisions
fn component_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9_-]{0,11}"
}

fn stored_path_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(component_strategy(), 1..6)
}

fn to_path(parts: &[String]) -> PathBuf {
    let mut path = PathBuf::from("/");
    for part in parts {
        path.push(part);
    }
    path
}

fn swap_case(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_uppercase() {
                c.to_ascii_lowercase()
            } else {
                c.to_ascii_uppercase()
            }
        })
        .collect()
}

fn check(fs: &MemoryFilesystem, requested: &Path) -> crate::ResolutionOutcome {
    let resolved = CanonicalPath::new(fs.canonicalize(requested).unwrap()).unwrap();
    CaseChecker::new(fs)
        .check_case_consistency(
            &anchor(requested, Path::new("/")).unwrap(),
            resolved,
            CaseSensitivity::Insensitive,
        )
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        max_shrink_iters: 2000,
        .. ProptestConfig::default()
    })]

    // Requesting the stored spelling always resolves, to the stored spelling
    #[test]
    fn exact_spelling_resolves(parts in stored_path_strategy()) {
        let fs = MemoryFilesystem::new(CaseSensitivity::Insensitive);
        let stored = to_path(&parts);
        fs.create_dir_all(&stored);

        let outcome = check(&fs, &stored);
        prop_assert!(outcome.is_resolved());
        prop_assert_eq!(outcome.resolved_path(), stored.as_path());
    }

    // Changing the case of one component is reported at exactly that component
    #[test]
    fn single_swapped_component_is_located(
        parts in stored_path_strategy(),
        index in any::<prop::sample::Index>(),
    ) {
        let fs = MemoryFilesystem::new(CaseSensitivity::Insensitive);
        fs.create_dir_all(to_path(&parts));

        let at = index.index(parts.len());
        let mut requested = parts.clone();
        requested[at] = swap_case(&parts[at]);

        let outcome = check(&fs, &to_path(&requested));
        let mismatch = outcome.mismatch().expect("swapped case must mismatch");
        let expected = to_path(&requested[..=at]);
        prop_assert_eq!(mismatch.offending_component_path(), expected.as_path());
        prop_assert_eq!(
            mismatch.component().stored().map(|s| s.to_string_lossy().into_owned()),
            Some(parts[at].clone())
        );
    }

    // Checking is deterministic
    #[test]
    fn checking_is_idempotent(parts in stored_path_strategy(), flip in any::<bool>()) {
        let fs = MemoryFilesystem::new(CaseSensitivity::Insensitive);
        fs.create_dir_all(to_path(&parts));

        let requested: Vec<String> = if flip {
            parts.iter().map(|p| swap_case(p)).collect()
        } else {
            parts.clone()
        };
        let path = to_path(&requested);
        prop_assert_eq!(check(&fs, &path), check(&fs, &path));
    }

    // Case-sensitive rules accept whatever canonicalization produced
    #[test]
    fn sensitive_always_resolves(parts in stored_path_strategy()) {
        let fs = MemoryFilesystem::new(CaseSensitivity::Sensitive);
        let path = to_path(&parts);
        let resolved = CanonicalPath::new(path.clone()).unwrap();

        let outcome = CaseChecker::new(&fs)
            .check_case_consistency(
                &anchor(&path, Path::new("/")).unwrap(),
                resolved,
                CaseSensitivity::Sensitive,
            )
            .unwrap();
        prop_assert!(outcome.is_resolved());
    }
}
