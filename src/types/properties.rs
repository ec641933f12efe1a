use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Declarative properties of a `go_testedbinary` module, populated by the
/// host engine after it parses the module definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BinaryModuleProperties {
    /// Go package to build as a command with `go build`.
    pub pkg: String,
    /// Go package to test with `go test`. Empty means no test action.
    pub test_pkg: String,
    /// Source glob patterns. Must be non-empty at generation time.
    pub srcs: Vec<String>,
    /// Exclude glob patterns applied to every pattern in `srcs`.
    pub srcs_exclude: Vec<String>,
    /// Run `go mod vendor` before building and testing.
    pub vendor_first: bool,
}

/// Declarative properties of a `go_test_coverage` module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoverageModuleProperties {
    /// Go package to generate a coverage report for.
    pub pkg: String,
    pub srcs: Vec<String>,
    pub srcs_exclude: Vec<String>,
}

/// Values the host engine injects into one generation pass for one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateContext {
    pub module_name: String,
    pub module_dir: PathBuf,
    pub base_output_dir: PathBuf,
}

impl GenerateContext {
    pub fn new(
        module_name: impl Into<String>,
        module_dir: impl Into<PathBuf>,
        base_output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            module_name: module_name.into(),
            module_dir: module_dir.into(),
            base_output_dir: base_output_dir.into(),
        }
    }
}
