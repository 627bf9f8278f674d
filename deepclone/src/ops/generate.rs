//! Generate operation - writes clone units for a project.

use std::path::Path;

use deepclone_codegen::{
    Generator,
    pipeline::{Pipeline, Severity, SnapshotPlugin},
};
use deepclone_core::{GeneratedFile, WriteResult};
use deepclone_manifest::{ProjectFile, SyntaxForest};
use eyre::{Context, Result};

use crate::reports::{GenerateReport, GenerationResult, PreviewFile, PreviewResult, WrittenResult};

/// Directory under the output directory that receives `--visualize` snapshots.
pub const DEBUG_DIR: &str = ".deepclone/debug";

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Output directory for generated units.
    pub output_dir: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
    /// Whether to output debug snapshots.
    pub visualize: bool,
}

/// Execute the generate operation.
pub fn generate(
    project: &ProjectFile,
    forest: &SyntaxForest,
    opts: GenerateOptions,
) -> Result<GenerateReport> {
    let debug_dir = opts.output_dir.join(DEBUG_DIR);

    let mut pipeline = Pipeline::new();
    if opts.visualize {
        pipeline = pipeline.plugin(SnapshotPlugin::with_output_dir(&debug_dir));
    }

    let manifest = project.manifest();
    let mut generator = Generator::from_config(&manifest.generator).with_pipeline(pipeline);
    let output = generator.run(forest).wrap_err("Generation failed")?;

    let warnings = output
        .diagnostics
        .iter()
        .filter(|d| matches!(d.severity, Severity::Warning | Severity::Error))
        .map(|d| d.to_string())
        .collect();

    let result = if opts.dry_run {
        GenerationResult::Preview(PreviewResult {
            files: output
                .units
                .iter()
                .map(|unit| PreviewFile {
                    path: unit.file_name(),
                    content: unit.source.clone(),
                })
                .collect(),
        })
    } else {
        let mut written = Vec::new();
        let mut unchanged = Vec::new();
        for unit in &output.units {
            let status = unit
                .write(opts.output_dir)
                .wrap_err_with(|| format!("Failed to write {}", unit.file_name()))?;
            match status {
                WriteResult::Written => written.push(unit.file_name()),
                WriteResult::Unchanged => unchanged.push(unit.file_name()),
            }
        }
        tracing::info!(written = written.len(), unchanged = unchanged.len(), "units written");

        GenerationResult::Written(WrittenResult {
            output_dir: opts.output_dir.to_path_buf(),
            written,
            unchanged,
            debug_dir: opts.visualize.then_some(debug_dir),
        })
    };

    Ok(GenerateReport {
        project_name: manifest.project.name.clone(),
        marked_count: output.closure.iter().filter(|id| output.closure.is_marked(*id)).count(),
        reached_count: output.closure.reached().count(),
        warnings,
        result,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn project(temp: &TempDir) -> ProjectFile {
        fs::write(
            temp.path().join("deepclone.toml"),
            "[project]\nname = \"demo\"\n",
        )
        .unwrap();
        fs::create_dir(temp.path().join("types")).unwrap();
        fs::write(
            temp.path().join("types/person.toml"),
            r#"
            namespace = "Demo"

            [[types]]
            name = "Person"
            modifiers = ["partial"]
            attributes = ["DeepCloneable"]

            [[types.members]]
            name = "Address"
            type = "Address?"

            [[types]]
            name = "Address"
            modifiers = ["partial"]
            "#,
        )
        .unwrap();
        ProjectFile::open(temp.path().join("deepclone.toml")).unwrap()
    }

    #[test]
    fn test_generate_writes_units() {
        let temp = TempDir::new().unwrap();
        let project = project(&temp);
        let forest = project.load_forest().unwrap();
        let output_dir = project.output_dir();

        let report = generate(
            &project,
            &forest,
            GenerateOptions {
                output_dir: &output_dir,
                dry_run: false,
                visualize: true,
            },
        )
        .unwrap();

        assert_eq!(report.marked_count, 1);
        assert_eq!(report.reached_count, 1);
        let GenerationResult::Written(written) = &report.result else {
            panic!("expected written result");
        };
        assert_eq!(
            written.written,
            vec!["DeepCloneableAttribute.g.cs", "Address.g.cs", "Person.g.cs"]
        );
        assert!(output_dir.join("Person.g.cs").exists());
        assert!(output_dir.join(DEBUG_DIR).join("closure.json").exists());

        // A second run leaves identical files alone.
        let again = generate(
            &project,
            &forest,
            GenerateOptions {
                output_dir: &output_dir,
                dry_run: false,
                visualize: false,
            },
        )
        .unwrap();
        let GenerationResult::Written(written) = &again.result else {
            panic!("expected written result");
        };
        assert!(written.written.is_empty());
        assert_eq!(written.unchanged.len(), 3);
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let project = project(&temp);
        let forest = project.load_forest().unwrap();
        let output_dir = project.output_dir();

        let report = generate(
            &project,
            &forest,
            GenerateOptions {
                output_dir: &output_dir,
                dry_run: true,
                visualize: false,
            },
        )
        .unwrap();

        let GenerationResult::Preview(preview) = &report.result else {
            panic!("expected preview result");
        };
        assert_eq!(preview.files.len(), 3);
        assert!(!output_dir.exists());
    }
}
