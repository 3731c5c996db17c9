//! Property-based tests for the path guard and profile parsing.

#![allow(clippy::expect_used)]

use btxz_core::Profile;
use btxz_core::types::DestDir;
use btxz_core::types::PathViolation;
use btxz_core::types::SafePath;
use proptest::prelude::*;
use std::path::Component;
use std::path::PathBuf;
use tempfile::TempDir;

fn create_test_dest() -> (TempDir, DestDir) {
    let temp = TempDir::new().expect("failed to create temp dir");
    let dest = DestDir::new(temp.path()).expect("failed to create dest");
    (temp, dest)
}

proptest! {
    /// Lexical resolution accepts exactly the names that never climb
    /// above the destination, and accepted names stay inside it.
    #[test]
    fn prop_containment_matches_lexical_depth(
        components in prop::collection::vec(prop_oneof!["\\.\\.", "\\.", "[a-z]{1,8}"], 1..8)
    ) {
        let (_temp, dest) = create_test_dest();
        let path = PathBuf::from(components.join("/"));

        let mut depth = 0i32;
        let mut escapes = false;
        for c in &components {
            match c.as_str() {
                ".." => depth -= 1,
                "." => {}
                _ => depth += 1,
            }
            escapes |= depth < 0;
        }

        match SafePath::validate(&path, &dest) {
            Ok(safe) => {
                prop_assert!(!escapes, "{path:?} escapes but was accepted");
                prop_assert!(dest.join(&safe).starts_with(dest.as_path()));
                prop_assert!(safe.as_path().components().all(|c| matches!(c, Component::Normal(_))));
            }
            Err(violation) => {
                prop_assert!(escapes, "{path:?} stays inside but was refused");
                prop_assert_eq!(violation, PathViolation::EscapesRoot);
            }
        }
    }

    /// Plain relative names are always accepted unchanged.
    #[test]
    fn prop_valid_relative_paths_accepted(
        components in prop::collection::vec("[a-zA-Z0-9_-]{1,20}", 1..5)
    ) {
        let (_temp, dest) = create_test_dest();
        let path = PathBuf::from(components.join("/"));
        let safe = SafePath::validate(&path, &dest);
        prop_assert!(safe.is_ok(), "valid path should be accepted");
        let safe = safe.expect("checked");
        prop_assert_eq!(safe.as_path(), path.as_path());
    }

    /// Absolute names are refused whatever they point at.
    #[test]
    fn prop_absolute_paths_rejected(
        components in prop::collection::vec("[a-z]{1,10}", 0..5)
    ) {
        let (_temp, dest) = create_test_dest();
        let path = PathBuf::from(format!("/{}", components.join("/")));
        prop_assert_eq!(SafePath::validate(&path, &dest), Err(PathViolation::Absolute));
    }

    /// Profile names parse regardless of case.
    #[test]
    fn prop_profile_names_case_insensitive(
        profile in prop::sample::select(Profile::ALL.to_vec()),
        mask in prop::collection::vec(any::<bool>(), 8)
    ) {
        let mixed: String = profile
            .as_str()
            .chars()
            .zip(mask.iter().cycle())
            .map(|(ch, upper)| if *upper { ch.to_ascii_uppercase() } else { ch })
            .collect();
        prop_assert_eq!(mixed.parse::<Profile>().expect("known profile"), profile);
    }
}
