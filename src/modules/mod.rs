//! Module-type facade binding declarative property holders to their emitters.
//!
//! The host engine's protocol is: look a module type up by name, get a
//! zero-valued property holder, populate the properties from the parsed
//! definition, then ask the module to generate its build actions.

pub mod error;

pub use error::*;

use tracing::debug;

use crate::emit::{emit_binary_actions, emit_coverage_action, EmitError};
use crate::rules::RuleRegistry;
use crate::sources::{resolve_sources, SourceGlob};
use crate::types::{
    BinaryModuleProperties, BuildAction, CoverageModuleProperties, GenerateContext,
};
use std::collections::BTreeMap;

/// One declaratively-described unit of buildable code.
pub trait BuildModule {
    /// Name the host engine registers this module type under.
    fn type_name(&self) -> &'static str;

    /// Populate the properties from a parsed declarative block.
    fn set_properties(&mut self, value: serde_json::Value) -> Result<(), ModuleError>;

    /// Resolve sources and emit this module's build actions. Resolution is
    /// atomic: on failure no actions are returned for the module.
    fn generate(
        &self,
        ctx: &GenerateContext,
        glob: &dyn SourceGlob,
        rules: &RuleRegistry,
    ) -> Result<Vec<BuildAction>, EmitError>;
}

/// Go command binary with an optional test action (`go_testedbinary`).
#[derive(Debug, Clone, Default)]
pub struct GoBinaryModule {
    pub properties: BinaryModuleProperties,
}

impl GoBinaryModule {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BuildModule for GoBinaryModule {
    fn type_name(&self) -> &'static str {
        "go_testedbinary"
    }

    fn set_properties(&mut self, value: serde_json::Value) -> Result<(), ModuleError> {
        self.properties =
            serde_json::from_value(value).map_err(|e| ModuleError::InvalidProperties {
                type_name: self.type_name(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    fn generate(
        &self,
        ctx: &GenerateContext,
        glob: &dyn SourceGlob,
        rules: &RuleRegistry,
    ) -> Result<Vec<BuildAction>, EmitError> {
        let resolved = resolve_sources(
            glob,
            "srcs",
            &self.properties.srcs,
            &self.properties.srcs_exclude,
        )?;
        emit_binary_actions(&self.properties, &resolved, ctx, rules)
    }
}

/// Coverage-report module (`go_test_coverage`).
#[derive(Debug, Clone, Default)]
pub struct GoCoverageModule {
    pub properties: CoverageModuleProperties,
}

impl GoCoverageModule {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BuildModule for GoCoverageModule {
    fn type_name(&self) -> &'static str {
        "go_test_coverage"
    }

    fn set_properties(&mut self, value: serde_json::Value) -> Result<(), ModuleError> {
        self.properties =
            serde_json::from_value(value).map_err(|e| ModuleError::InvalidProperties {
                type_name: self.type_name(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    fn generate(
        &self,
        ctx: &GenerateContext,
        glob: &dyn SourceGlob,
        rules: &RuleRegistry,
    ) -> Result<Vec<BuildAction>, EmitError> {
        let resolved = resolve_sources(
            glob,
            "srcs",
            &self.properties.srcs,
            &self.properties.srcs_exclude,
        )?;
        let action = emit_coverage_action(&self.properties, &resolved, ctx, rules)?;
        Ok(vec![action])
    }
}

type ModuleFactory = fn() -> Box<dyn BuildModule>;

/// By-name registry of module-type factories, mirroring the host engine's
/// `register_module_type` call surface.
pub struct ModuleTypeRegistry {
    factories: BTreeMap<&'static str, ModuleFactory>,
}

impl ModuleTypeRegistry {
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Registry with both Go module kinds pre-registered.
    pub fn with_go_modules() -> Self {
        let mut registry = Self::new();
        registry.register("go_testedbinary", || Box::new(GoBinaryModule::new()));
        registry.register("go_test_coverage", || Box::new(GoCoverageModule::new()));
        registry
    }

    pub fn register(&mut self, name: &'static str, factory: ModuleFactory) {
        self.factories.insert(name, factory);
    }

    /// Construct a zero-valued module of the named type.
    pub fn create(&self, name: &str) -> Result<Box<dyn BuildModule>, ModuleError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| ModuleError::UnknownType {
                name: name.to_string(),
            })?;
        debug!(module_type = name, "instantiating module");
        Ok(factory())
    }

    pub fn list_types(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }
}

impl Default for ModuleTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
