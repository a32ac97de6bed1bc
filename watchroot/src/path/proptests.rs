//! Property-based tests for anchoring.

use super::normalize::anchor;
use proptest::prelude::*;
use std::path::{Component, PathBuf};

fn path_component_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        8 => "[A-Za-z0-9_-]{1,12}",
        1 => Just(".".to_string()),
        1 => Just("..".to_string()),
    ]
}

fn relative_path_strategy() -> impl Strategy<Value = PathBuf> {
    prop::collection::vec(path_component_strategy(), 1..8)
        .prop_map(|parts| parts.iter().collect())
}

fn absolute_path_strategy() -> impl Strategy<Value = PathBuf> {
    relative_path_strategy().prop_map(|rel| PathBuf::from("/").join(rel))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Joining the anchor back to the literal part gives the original path
    #[test]
    fn absolute_anchor_round_trips(path in absolute_path_strategy()) {
        let anchored = anchor(&path, &PathBuf::from("/unused")).unwrap();
        prop_assert_eq!(anchored.joined(), path);
    }

    // Relative requests are anchored at the base and keep their spelling
    #[test]
    fn relative_anchor_uses_base(path in relative_path_strategy()) {
        let base = PathBuf::from("/work/Base");
        let anchored = anchor(&path, &base).unwrap();
        prop_assert_eq!(&anchored.anchor, &base);
        prop_assert_eq!(&anchored.literal, &path);
    }

    // The literal part never carries a root, so case checks start below it
    #[test]
    fn literal_part_is_never_rooted(path in absolute_path_strategy()) {
        let anchored = anchor(&path, &PathBuf::from("/")).unwrap();
        let rooted = anchored
            .literal
            .components()
            .any(|c| matches!(c, Component::RootDir | Component::Prefix(_)));
        prop_assert!(!rooted);
        prop_assert!(anchored.anchor.has_root());
    }
}
