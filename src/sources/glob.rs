use globset::{GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::error::GlobError;

/// Glob-with-dependency-tracking primitive consumed from the host engine.
///
/// The host engine is expected to supply an implementation that records which
/// files and directories each pattern touched, so it can invalidate and
/// regenerate a module's actions when the glob results change. [`FsGlob`] is a
/// plain filesystem-backed implementation for standalone use and tests.
pub trait SourceGlob {
    /// Expand `pattern` into matched file paths, suppressing any match also
    /// matched by a pattern in `excludes`.
    fn glob_with_deps(&self, pattern: &str, excludes: &[String]) -> Result<Vec<PathBuf>, GlobError>;
}

/// Filesystem-backed [`SourceGlob`] rooted at a module directory. Matches are
/// returned relative to the root, files only, sorted.
#[derive(Debug, Clone)]
pub struct FsGlob {
    root: PathBuf,
}

impl FsGlob {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn compile_include(pattern: &str) -> Result<GlobMatcher, GlobError> {
        // `*` must not cross directory separators; sub-tree matches take an
        // explicit `**`.
        GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map(|g| g.compile_matcher())
            .map_err(|e| GlobError::PatternInvalid {
                pattern: pattern.to_string(),
                reason: e.kind().to_string(),
            })
    }

    fn compile_excludes(pattern: &str, excludes: &[String]) -> Result<GlobSet, GlobError> {
        let mut builder = GlobSetBuilder::new();
        for exclude in excludes {
            let glob = GlobBuilder::new(exclude)
                .literal_separator(true)
                .build()
                .map_err(|e| GlobError::PatternInvalid {
                    pattern: exclude.to_string(),
                    reason: e.kind().to_string(),
                })?;
            builder.add(glob);
        }
        builder.build().map_err(|e| GlobError::PatternInvalid {
            pattern: pattern.to_string(),
            reason: e.kind().to_string(),
        })
    }
}

impl SourceGlob for FsGlob {
    fn glob_with_deps(&self, pattern: &str, excludes: &[String]) -> Result<Vec<PathBuf>, GlobError> {
        let include = Self::compile_include(pattern)?;
        let exclude_set = Self::compile_excludes(pattern, excludes)?;

        let mut matches = Vec::new();
        for entry in WalkDir::new(&self.root) {
            let entry = entry.map_err(|e| GlobError::Io {
                pattern: pattern.to_string(),
                source: e.into(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(&self.root)
                .unwrap_or_else(|_| entry.path());
            if include.is_match(rel) && !exclude_set.is_match(rel) {
                matches.push(rel.to_path_buf());
            }
        }
        matches.sort();
        Ok(matches)
    }
}
