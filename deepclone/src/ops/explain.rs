//! Explain operation - why a type is or is not generated.

use deepclone_codegen::Generator;
use deepclone_manifest::{ProjectFile, SyntaxForest};
use eyre::{Context, Result};

use crate::reports::ExplainReport;

pub fn explain(project: &ProjectFile, forest: &SyntaxForest, type_name: &str) -> Result<ExplainReport> {
    let mut generator = Generator::from_config(&project.manifest().generator);
    let output = generator.run(forest).wrap_err("Analysis failed")?;
    let explanation = deepclone_codegen::explain(output, type_name)?;

    Ok(ExplainReport {
        marker: generator.marker().qualified_class_name(),
        explanation,
    })
}
