//! Check operation - analysis without writing.

use deepclone_codegen::{Generator, pipeline::Severity};
use deepclone_ir::TypeId;
use deepclone_manifest::{ProjectFile, SyntaxForest};
use eyre::{Context, Result};

use crate::reports::{CheckReport, PlanSummary};

/// Execute the check operation.
///
/// Runs a full pass and reports diagnostics, the closure and every plan.
pub fn check(project: &ProjectFile, forest: &SyntaxForest) -> Result<CheckReport> {
    let mut generator = Generator::from_config(&project.manifest().generator);
    let output = generator.run(forest).wrap_err("Analysis failed")?;

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    for diag in &output.diagnostics {
        let msg = if let Some(loc) = &diag.location {
            format!("{}\n  --> {}", diag.message, loc)
        } else {
            diag.message.clone()
        };

        match diag.severity {
            Severity::Error => errors.push(msg),
            Severity::Warning => warnings.push(msg),
            Severity::Info => infos.push(msg),
        }
    }

    let name_of = |id: TypeId| {
        output
            .symbols
            .get(id)
            .map(|s| s.qualified_name())
            .unwrap_or_else(|| id.to_string())
    };

    let plans = output
        .plans
        .iter()
        .map(|plan| PlanSummary {
            type_name: plan.qualified_name(),
            properties: plan
                .properties
                .iter()
                .map(|p| {
                    let mode = if p.recursive {
                        "clone"
                    } else if p.element_recursive {
                        "copy (elements cloneable)"
                    } else {
                        "copy"
                    };
                    (p.name.clone(), mode.to_string())
                })
                .collect(),
        })
        .collect();

    Ok(CheckReport {
        config_path: project.path().to_path_buf(),
        file_count: forest.files().len(),
        symbol_count: output.symbols.len(),
        marked: output
            .closure
            .iter()
            .filter(|id| output.closure.is_marked(*id))
            .map(name_of)
            .collect(),
        reached: output.closure.reached().map(name_of).collect(),
        plans,
        errors,
        warnings,
        infos,
    })
}
