use gobuild_gen::sources::{resolve_sources, FsGlob, SourceGlob};
use proptest::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn touch(dir: &Path, name: &str) {
    if let Some(parent) = Path::new(name).parent() {
        fs::create_dir_all(dir.join(parent)).expect("Failed to create fixture dirs");
    }
    fs::write(dir.join(name), b"package main\n").expect("Failed to write fixture file");
}

fn strings(patterns: &[&str]) -> Vec<String> {
    patterns.iter().map(|p| p.to_string()).collect()
}

#[test]
fn test_resolve_partitions_test_and_ordinary_sources() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    touch(dir.path(), "a.go");
    touch(dir.path(), "a_test.go");
    touch(dir.path(), "b.go");

    let glob = FsGlob::new(dir.path());
    let resolved = resolve_sources(&glob, "srcs", &strings(&["*.go"]), &[]).unwrap();

    assert_eq!(
        resolved.sources,
        [PathBuf::from("a.go"), PathBuf::from("b.go")].into()
    );
    assert_eq!(resolved.test_sources, [PathBuf::from("a_test.go")].into());
}

#[test]
fn test_star_does_not_cross_directories() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    touch(dir.path(), "main.go");
    touch(dir.path(), "pkg/util.go");

    let glob = FsGlob::new(dir.path());
    let resolved = resolve_sources(&glob, "srcs", &strings(&["*.go"]), &[]).unwrap();
    assert_eq!(resolved.sources, [PathBuf::from("main.go")].into());

    let resolved = resolve_sources(&glob, "srcs", &strings(&["**/*.go"]), &[]).unwrap();
    assert_eq!(resolved.sources.len(), 2);
}

#[test]
fn test_excludes_suppress_matches() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    touch(dir.path(), "main.go");
    touch(dir.path(), "generated.go");

    let glob = FsGlob::new(dir.path());
    let resolved = resolve_sources(
        &glob,
        "srcs",
        &strings(&["*.go"]),
        &strings(&["generated.go"]),
    )
    .unwrap();
    assert_eq!(resolved.sources, [PathBuf::from("main.go")].into());
}

#[test]
fn test_overlapping_patterns_yield_set_semantics() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    touch(dir.path(), "a.go");
    touch(dir.path(), "ab.go");

    let glob = FsGlob::new(dir.path());
    let resolved = resolve_sources(&glob, "srcs", &strings(&["*.go", "a*.go"]), &[]).unwrap();
    assert_eq!(resolved.sources.len(), 2);
}

#[test]
fn test_malformed_pattern_fails_atomically() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    touch(dir.path(), "a.go");

    let glob = FsGlob::new(dir.path());
    let result = resolve_sources(&glob, "srcs", &strings(&["*.go", "bad[.go"]), &[]);

    let err = result.expect_err("malformed pattern must fail resolution");
    assert_eq!(err.field(), "srcs");
    assert_eq!(err.pattern, "bad[.go");
}

#[test]
fn test_no_matches_is_not_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    let glob = FsGlob::new(dir.path());
    let resolved = resolve_sources(&glob, "srcs", &strings(&["*.go"]), &[]).unwrap();
    assert!(resolved.is_empty());
}

#[test]
fn test_directories_are_not_matched() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::create_dir(dir.path().join("vendor.go")).expect("Failed to create dir fixture");
    touch(dir.path(), "main.go");

    let glob = FsGlob::new(dir.path());
    let matches = glob.glob_with_deps("*.go", &[]).unwrap();
    assert_eq!(matches, vec![PathBuf::from("main.go")]);
}

proptest! {
    /// Ordinary and test sources are always disjoint, and resolving twice
    /// against an unchanged tree yields the same partition.
    #[test]
    fn prop_resolution_is_disjoint_and_idempotent(
        names in proptest::collection::btree_set("[a-z]{1,8}", 1..12),
        test_flags in proptest::collection::vec(any::<bool>(), 12),
    ) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut expected_tests = 0usize;
        for (name, is_test) in names.iter().zip(test_flags.iter()) {
            if *is_test {
                touch(dir.path(), &format!("{name}_test.go"));
                expected_tests += 1;
            } else {
                touch(dir.path(), &format!("{name}.go"));
            }
        }

        let glob = FsGlob::new(dir.path());
        let first = resolve_sources(&glob, "srcs", &strings(&["*.go"]), &[]).unwrap();
        let second = resolve_sources(&glob, "srcs", &strings(&["*.go"]), &[]).unwrap();

        prop_assert!(first.sources.is_disjoint(&first.test_sources));
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.test_sources.len(), expected_tests);
        prop_assert_eq!(first.len(), names.len());
    }
}
