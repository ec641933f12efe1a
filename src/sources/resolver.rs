use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::error::ResolveError;
use super::glob::SourceGlob;

/// Source files of one module, partitioned by role. Built fresh on every
/// generation pass; never cached across passes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSourceSet {
    /// Non-test sources. These feed the production binary.
    pub sources: BTreeSet<PathBuf>,
    /// Files whose name ends in `_test.go`.
    pub test_sources: BTreeSet<PathBuf>,
}

impl ResolvedSourceSet {
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty() && self.test_sources.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sources.len() + self.test_sources.len()
    }

    /// Union of ordinary and test sources.
    pub fn all(&self) -> impl Iterator<Item = &PathBuf> {
        self.sources.iter().chain(self.test_sources.iter())
    }
}

pub(crate) fn is_test_source(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with("_test.go"))
}

/// Expand `include` patterns against `exclude` patterns and classify the
/// matches into a [`ResolvedSourceSet`].
///
/// Resolution is atomic: if any single pattern fails to expand, the whole
/// resolution fails and no partial set is returned. The error carries `field`
/// (the declarative property the patterns came from) so the host engine can
/// surface it as a property-level error. Zero matches is not an error.
pub fn resolve_sources(
    glob: &dyn SourceGlob,
    field: &'static str,
    include: &[String],
    exclude: &[String],
) -> Result<ResolvedSourceSet, ResolveError> {
    let mut resolved = ResolvedSourceSet::default();
    for pattern in include {
        let matches = glob
            .glob_with_deps(pattern, exclude)
            .map_err(|source| ResolveError {
                field,
                pattern: pattern.clone(),
                source,
            })?;
        for path in matches {
            if is_test_source(&path) {
                resolved.test_sources.insert(path);
            } else {
                resolved.sources.insert(path);
            }
        }
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::error::GlobError;
    use std::collections::BTreeMap;

    /// Canned [`SourceGlob`] for tests that do not need a filesystem.
    struct StaticGlob {
        results: BTreeMap<String, Vec<PathBuf>>,
    }

    impl StaticGlob {
        fn new(entries: &[(&str, &[&str])]) -> Self {
            let results = entries
                .iter()
                .map(|(pattern, paths)| {
                    (
                        pattern.to_string(),
                        paths.iter().map(PathBuf::from).collect(),
                    )
                })
                .collect();
            Self { results }
        }
    }

    impl SourceGlob for StaticGlob {
        fn glob_with_deps(
            &self,
            pattern: &str,
            _excludes: &[String],
        ) -> Result<Vec<PathBuf>, GlobError> {
            self.results.get(pattern).cloned().ok_or_else(|| {
                GlobError::PatternInvalid {
                    pattern: pattern.to_string(),
                    reason: "no such pattern".to_string(),
                }
            })
        }
    }

    #[test]
    fn classifies_test_sources_by_file_name() {
        assert!(is_test_source(Path::new("a_test.go")));
        assert!(is_test_source(Path::new("pkg/parser_test.go")));
        assert!(!is_test_source(Path::new("a.go")));
        assert!(!is_test_source(Path::new("test.go")));
        assert!(!is_test_source(Path::new("a_test.go.bak")));
    }

    #[test]
    fn partitions_matches_into_disjoint_sets() {
        let glob = StaticGlob::new(&[("*.go", &["a.go", "a_test.go", "b.go"])]);
        let resolved = resolve_sources(&glob, "srcs", &["*.go".to_string()], &[]).unwrap();

        assert_eq!(
            resolved.sources,
            [PathBuf::from("a.go"), PathBuf::from("b.go")].into()
        );
        assert_eq!(resolved.test_sources, [PathBuf::from("a_test.go")].into());
        assert!(resolved.sources.is_disjoint(&resolved.test_sources));
    }

    #[test]
    fn deduplicates_across_patterns() {
        let glob = StaticGlob::new(&[
            ("*.go", &["a.go", "b.go"]),
            ("a*.go", &["a.go"]),
        ]);
        let resolved = resolve_sources(
            &glob,
            "srcs",
            &["*.go".to_string(), "a*.go".to_string()],
            &[],
        )
        .unwrap();
        assert_eq!(resolved.len(), 2);
    }

    #[test]
    fn failing_pattern_aborts_whole_resolution() {
        let glob = StaticGlob::new(&[("*.go", &["a.go"])]);
        let err = resolve_sources(
            &glob,
            "srcs",
            &["*.go".to_string(), "missing".to_string()],
            &[],
        )
        .unwrap_err();
        assert_eq!(err.field(), "srcs");
        assert_eq!(err.pattern, "missing");
    }

    #[test]
    fn empty_match_set_is_not_an_error() {
        let glob = StaticGlob::new(&[("*.go", &[])]);
        let resolved = resolve_sources(&glob, "srcs", &["*.go".to_string()], &[]).unwrap();
        assert!(resolved.is_empty());
    }
}
