use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Kind of build rule an action is bound to. The host engine resolves the
/// kind to a command template through the [`RuleRegistry`](crate::rules::RuleRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RuleKind {
    Vendor,
    Build,
    Test,
    Coverage,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Vendor => "vendor",
            RuleKind::Build => "build",
            RuleKind::Test => "test",
            RuleKind::Coverage => "coverage",
        }
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single unit of work handed back to the host engine.
///
/// `outputs` must be unique across the whole execution graph; collisions are
/// detected and reported by the host engine, not here. `implicit_inputs` must
/// spell out every file the command reads so incremental rebuilds stay
/// correct: under-declaring silently breaks incrementality, over-declaring
/// costs parallelism.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildAction {
    pub description: String,
    pub rule: RuleKind,
    pub outputs: Vec<PathBuf>,
    pub implicit_inputs: BTreeSet<PathBuf>,
    pub work_dir: PathBuf,
    pub args: BTreeMap<String, String>,
    /// Optional actions may be skipped by the host engine when nothing in the
    /// graph references their outputs.
    pub optional: bool,
}

impl BuildAction {
    /// Whether `path` is declared as an output of this action.
    pub fn produces(&self, path: &std::path::Path) -> bool {
        self.outputs.iter().any(|o| o == path)
    }
}
