use std::collections::BTreeMap;
use tracing::debug;

use super::error::EmitError;
use crate::rules::RuleRegistry;
use crate::sources::ResolvedSourceSet;
use crate::types::{BuildAction, CoverageModuleProperties, GenerateContext, RuleKind};

/// Emit the single action of a `go_test_coverage` module.
///
/// Coverage instruments the package under test, so the implicit inputs are
/// the full union of ordinary and test sources. The coverage profile is an
/// intermediate artifact derived from the report path and is not declared as
/// a graph node.
pub fn emit_coverage_action(
    props: &CoverageModuleProperties,
    resolved: &ResolvedSourceSet,
    ctx: &GenerateContext,
    rules: &RuleRegistry,
) -> Result<BuildAction, EmitError> {
    debug!(
        module = %ctx.module_name,
        "adding build action for go coverage report"
    );
    if props.srcs.is_empty() {
        return Err(EmitError::EmptyProperty { field: "srcs" });
    }

    let output_path = ctx
        .base_output_dir
        .join("reports")
        .join(format!("{}.html", ctx.module_name));
    let profile_path = output_path.with_extension("out");

    let rule = rules.rule(RuleKind::Coverage)?;
    let args: BTreeMap<String, String> = [
        ("workDir".to_string(), ctx.module_dir.to_string_lossy().into_owned()),
        ("pkg".to_string(), props.pkg.clone()),
        ("profilePath".to_string(), profile_path.to_string_lossy().into_owned()),
        ("outputPath".to_string(), output_path.to_string_lossy().into_owned()),
    ]
    .into();
    rule.ensure_args(&args)?;

    Ok(BuildAction {
        description: format!("Generating {}.html", ctx.module_name),
        rule: RuleKind::Coverage,
        outputs: vec![output_path],
        implicit_inputs: resolved.all().cloned().collect(),
        work_dir: ctx.module_dir.clone(),
        args,
        optional: false,
    })
}
