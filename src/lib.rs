//! gobuild-gen - Build-action generation for Go package modules
//!
//! This crate teaches a generic build-orchestration engine how to build and
//! test Go packages. It does not build anything itself: the host engine parses
//! the declarative module definitions, asks this crate to generate the build
//! actions for each module, and merges the results into its global execution
//! graph before handing them to the external executor.
//!
//! Ordering between actions is expressed purely through file identity: a
//! consumer action lists the producer action's declared output among its
//! implicit inputs. There is no action-to-action edge type.

pub mod emit;
pub mod modules;
pub mod rules;
pub mod sources;
pub mod types;

pub use modules::{BuildModule, GoBinaryModule, GoCoverageModule, ModuleTypeRegistry};
pub use rules::RuleRegistry;
pub use sources::{resolve_sources, FsGlob, ResolvedSourceSet, SourceGlob};
pub use types::*;
