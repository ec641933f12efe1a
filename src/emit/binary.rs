use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::error::EmitError;
use crate::rules::RuleRegistry;
use crate::sources::ResolvedSourceSet;
use crate::types::{BinaryModuleProperties, BuildAction, GenerateContext, RuleKind};

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Emit the actions of one `go_testedbinary` module: optional vendor,
/// optional test, mandatory build.
///
/// When `vendor_first` is set, the vendor action's declared output path joins
/// the implicit-input set of every subsequent action. That shared path is the
/// sole ordering mechanism between vendor and build/test; the host engine has
/// no action-to-action edge type.
///
/// Note the test report path is `base_output_dir/report.log` for every
/// module. Two modules with test actions collide on it; the host engine's
/// output-uniqueness check is what surfaces the clash.
pub fn emit_binary_actions(
    props: &BinaryModuleProperties,
    resolved: &ResolvedSourceSet,
    ctx: &GenerateContext,
    rules: &RuleRegistry,
) -> Result<Vec<BuildAction>, EmitError> {
    debug!(
        module = %ctx.module_name,
        "adding build actions for go binary module"
    );
    if props.srcs.is_empty() {
        return Err(EmitError::EmptyProperty { field: "srcs" });
    }
    if resolved.is_empty() {
        warn!(
            module = %ctx.module_name,
            "source patterns matched no files"
        );
    }

    let output_path = ctx.base_output_dir.join("bin").join(&ctx.module_name);
    let report_path = ctx.base_output_dir.join("report.log");
    let work_dir_arg = path_arg(&ctx.module_dir);

    let mut actions = Vec::with_capacity(3);
    let mut build_inputs: BTreeSet<PathBuf> = resolved.sources.clone();

    if props.vendor_first {
        let vendor_dir = ctx.module_dir.join("vendor");
        let rule = rules.rule(RuleKind::Vendor)?;
        let args: BTreeMap<String, String> = [
            ("workDir".to_string(), work_dir_arg.clone()),
            ("name".to_string(), ctx.module_name.clone()),
        ]
        .into();
        rule.ensure_args(&args)?;

        actions.push(BuildAction {
            description: format!("Vendor dependencies of {}", ctx.module_name),
            rule: RuleKind::Vendor,
            outputs: vec![vendor_dir.clone()],
            implicit_inputs: [ctx.module_dir.join("go.mod")].into(),
            work_dir: ctx.module_dir.clone(),
            args,
            optional: true,
        });
        build_inputs.insert(vendor_dir);
    }

    if !props.test_pkg.is_empty() {
        let rule = rules.rule(RuleKind::Test)?;
        let args: BTreeMap<String, String> = [
            ("workDir".to_string(), work_dir_arg.clone()),
            ("reportPath".to_string(), path_arg(&report_path)),
            ("testPkg".to_string(), props.test_pkg.clone()),
        ]
        .into();
        rule.ensure_args(&args)?;

        let mut test_inputs = build_inputs.clone();
        test_inputs.extend(resolved.test_sources.iter().cloned());

        actions.push(BuildAction {
            description: format!("Test module {}", props.test_pkg),
            rule: RuleKind::Test,
            outputs: vec![report_path],
            implicit_inputs: test_inputs,
            work_dir: ctx.module_dir.clone(),
            args,
            optional: false,
        });
    }

    let rule = rules.rule(RuleKind::Build)?;
    let args: BTreeMap<String, String> = [
        ("workDir".to_string(), work_dir_arg),
        ("outputPath".to_string(), path_arg(&output_path)),
        ("pkg".to_string(), props.pkg.clone()),
    ]
    .into();
    rule.ensure_args(&args)?;

    actions.push(BuildAction {
        description: format!("Build {} as Go binary", ctx.module_name),
        rule: RuleKind::Build,
        outputs: vec![output_path],
        // Test sources stay out of the build inputs: they do not participate
        // in the production binary.
        implicit_inputs: build_inputs,
        work_dir: ctx.module_dir.clone(),
        args,
        optional: false,
    });

    Ok(actions)
}
