//! Command templates for the Go build rules.
//!
//! Templates are immutable constant data. The registry binding them to
//! [`RuleKind`]s is an explicit object constructed once per build session and
//! passed by reference into the emitters, so independent sessions (including
//! tests) never share state.

use std::collections::BTreeMap;
use thiserror::Error;

use crate::types::RuleKind;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("no rule registered for kind '{kind}'")]
    UnknownRule { kind: RuleKind },

    #[error("rule '{rule}' references variable '{variable}' absent from action args")]
    MissingVariable { rule: &'static str, variable: &'static str },
}

/// A command template keyed by rule kind. `variables` lists every `$var` the
/// command references; emitters must provide all of them in an action's args.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleTemplate {
    pub name: &'static str,
    pub command: &'static str,
    pub description: &'static str,
    pub variables: &'static [&'static str],
}

pub const GO_VENDOR: RuleTemplate = RuleTemplate {
    name: "vendor",
    command: "cd $workDir && go mod vendor",
    description: "vendor dependencies of $name",
    variables: &["workDir", "name"],
};

pub const GO_BUILD: RuleTemplate = RuleTemplate {
    name: "binaryBuild",
    command: "cd $workDir && go build -o $outputPath $pkg",
    description: "build go command $pkg",
    variables: &["workDir", "outputPath", "pkg"],
};

pub const GO_TEST: RuleTemplate = RuleTemplate {
    name: "test",
    command: "cd $workDir && go test -v $testPkg > $reportPath",
    description: "test $testPkg",
    variables: &["workDir", "reportPath", "testPkg"],
};

pub const GO_COVERAGE: RuleTemplate = RuleTemplate {
    name: "coverage",
    command: "cd $workDir && go test $pkg -coverprofile=$profilePath && go tool cover -html=$profilePath -o $outputPath",
    description: "generating test coverage of $pkg",
    variables: &["workDir", "pkg", "profilePath", "outputPath"],
};

impl RuleTemplate {
    /// Check that `args` covers every variable the command references.
    pub fn ensure_args(&self, args: &BTreeMap<String, String>) -> Result<(), RuleError> {
        for &variable in self.variables {
            if !args.contains_key(variable) {
                return Err(RuleError::MissingVariable {
                    rule: self.name,
                    variable,
                });
            }
        }
        Ok(())
    }

    /// Substitute `$var` occurrences from `args` into the command string.
    ///
    /// Command materialization belongs to the host engine; this exists for
    /// diagnostics and tests that want to see the concrete shell line.
    pub fn expand(&self, args: &BTreeMap<String, String>) -> Result<String, RuleError> {
        self.ensure_args(args)?;
        let mut variables: Vec<&&str> = self.variables.iter().collect();
        // Longest first so $outputPath is not clobbered by a hypothetical $output.
        variables.sort_by_key(|v| std::cmp::Reverse(v.len()));
        let mut command = self.command.to_string();
        for variable in variables {
            if let Some(value) = args.get(*variable) {
                command = command.replace(&format!("${variable}"), value);
            }
        }
        Ok(command)
    }
}

/// Rule-kind to command-template table for one build session.
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    rules: BTreeMap<RuleKind, RuleTemplate>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Registry with the four Go rules pre-registered.
    pub fn with_go_rules() -> Self {
        let mut registry = Self::new();
        registry.register(RuleKind::Vendor, GO_VENDOR);
        registry.register(RuleKind::Build, GO_BUILD);
        registry.register(RuleKind::Test, GO_TEST);
        registry.register(RuleKind::Coverage, GO_COVERAGE);
        registry
    }

    pub fn register(&mut self, kind: RuleKind, template: RuleTemplate) {
        self.rules.insert(kind, template);
    }

    pub fn get(&self, kind: RuleKind) -> Option<&RuleTemplate> {
        self.rules.get(&kind)
    }

    pub fn rule(&self, kind: RuleKind) -> Result<&RuleTemplate, RuleError> {
        self.rules
            .get(&kind)
            .ok_or(RuleError::UnknownRule { kind })
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
