//! Hostile entry names never write outside the destination.

#![allow(clippy::unwrap_used)]

mod common;

use btxz_core::extract_archive;
use btxz_core::list_archive;
use common::Raw;
use common::password;
use common::raw_tar;
use common::write_sealed;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_traversal_and_absolute_entries_are_skipped() {
    let temp = TempDir::new().unwrap();
    let tar = raw_tar(&[
        Raw::File("../../outside.txt", b"escaped"),
        Raw::File("/etc/passwd", b"root::0:0"),
        Raw::File("safe/inside.txt", b"fine"),
    ]);
    let archive = write_sealed(temp.path(), "evil.btxz", &tar, "pw");

    let dest = temp.path().join("a").join("b");
    let report = extract_archive(&archive, &dest, &password("pw")).unwrap();

    assert_eq!(report.skipped, vec!["../../outside.txt", "/etc/passwd"]);
    assert_eq!(report.files_extracted, 1);
    assert!(!temp.path().join("outside.txt").exists());
    assert!(!dest.join("etc/passwd").exists());
    assert_eq!(fs::read(dest.join("safe/inside.txt")).unwrap(), b"fine");
}

#[test]
fn test_sibling_prefix_is_not_inside() {
    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("out");
    let tar = raw_tar(&[Raw::File("../outside/x.txt", b"x")]);
    let archive = write_sealed(temp.path(), "sibling.btxz", &tar, "pw");

    let report = extract_archive(&archive, &dest, &password("pw")).unwrap();

    assert_eq!(report.skipped, vec!["../outside/x.txt"]);
    assert!(!temp.path().join("outside").exists());
}

#[test]
fn test_inner_parent_components_resolve_inside() {
    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("out");
    let tar = raw_tar(&[Raw::File("a/../b.txt", b"b")]);
    let archive = write_sealed(temp.path(), "inner.btxz", &tar, "pw");

    let report = extract_archive(&archive, &dest, &password("pw")).unwrap();

    assert!(!report.has_skipped());
    assert_eq!(fs::read(dest.join("b.txt")).unwrap(), b"b");
}

#[test]
fn test_symlink_entries_are_never_created() {
    let temp = TempDir::new().unwrap();
    let outside = temp.path().join("outside");
    fs::create_dir(&outside).unwrap();
    let dest = temp.path().join("out");

    let target = outside.to_str().unwrap().to_string();
    let tar = raw_tar(&[
        Raw::Symlink("link", &target),
        Raw::File("link/pwned.txt", b"evil"),
    ]);
    let archive = write_sealed(temp.path(), "link.btxz", &tar, "pw");

    let report = extract_archive(&archive, &dest, &password("pw")).unwrap();

    assert_eq!(report.entries_ignored, 1);
    assert_eq!(report.warnings, vec!["ignored symlink link"]);
    assert!(!outside.join("pwned.txt").exists());
    assert!(fs::symlink_metadata(dest.join("link")).unwrap().is_dir());
}

#[cfg(unix)]
#[test]
fn test_preexisting_symlink_in_destination_is_not_followed() {
    let temp = TempDir::new().unwrap();
    let outside = temp.path().join("outside");
    let dest = temp.path().join("out");
    fs::create_dir(&outside).unwrap();
    fs::create_dir(&dest).unwrap();
    std::os::unix::fs::symlink(&outside, dest.join("escape")).unwrap();

    let tar = raw_tar(&[Raw::File("escape/pwned.txt", b"evil")]);
    let archive = write_sealed(temp.path(), "pre.btxz", &tar, "pw");

    let report = extract_archive(&archive, &dest, &password("pw")).unwrap();

    assert_eq!(report.skipped, vec!["escape/pwned.txt"]);
    assert!(!outside.join("pwned.txt").exists());
}

#[test]
fn test_listing_shows_hostile_names() {
    let temp = TempDir::new().unwrap();
    let tar = raw_tar(&[Raw::File("../../outside.txt", b"x"), Raw::Dir("d/")]);
    let archive = write_sealed(temp.path(), "list.btxz", &tar, "pw");

    let manifest = list_archive(&archive, &password("pw")).unwrap();
    let names: Vec<_> = manifest.entries.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(names, ["../../outside.txt", "d"]);
    assert!(!temp.path().join("outside.txt").exists());
}
