//! Generate command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from code generation.
#[derive(Debug)]
pub struct GenerateReport {
    /// Project name from manifest.
    pub project_name: String,
    /// Number of explicitly marked types in the closure.
    pub marked_count: usize,
    /// Number of types pulled in through member references.
    pub reached_count: usize,
    /// Warning and error diagnostics from the pass.
    pub warnings: Vec<String>,
    pub result: GenerationResult,
}

/// Result of code generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(PreviewResult),
}

/// Result when files were written to disk.
#[derive(Debug)]
pub struct WrittenResult {
    pub output_dir: PathBuf,
    /// Files whose content changed.
    pub written: Vec<String>,
    /// Files that already had identical content.
    pub unchanged: Vec<String>,
    /// Path to debug snapshots, if visualization was enabled.
    pub debug_dir: Option<PathBuf>,
}

/// Result of a dry-run preview.
#[derive(Debug)]
pub struct PreviewResult {
    pub files: Vec<PreviewFile>,
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    pub path: String,
    pub content: String,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.preformatted(warning);
        }
        if !self.warnings.is_empty() {
            out.newline();
        }

        match &self.result {
            GenerationResult::Written(written) => self.render_written(out, written),
            GenerationResult::Preview(preview) => self.render_preview(out, preview),
        }
    }
}

impl GenerateReport {
    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        if let Some(debug_dir) = &written.debug_dir {
            out.key_value(
                "Pipeline snapshots written to",
                &debug_dir.display().to_string(),
            );
            out.newline();
        }

        out.preformatted(&self.project_name);
        out.key_value_indented("Marked types", &self.marked_count.to_string());
        out.key_value_indented("Reached types", &self.reached_count.to_string());
        out.newline();

        if !written.written.is_empty() {
            out.section("Written");
            for file in &written.written {
                out.added_item(file);
            }
        }

        let total = written.written.len() + written.unchanged.len();
        out.key_value(
            "Generated",
            &format!(
                "{} ({} files, {} unchanged)",
                written.output_dir.display(),
                total,
                written.unchanged.len()
            ),
        );
    }

    fn render_preview(&self, out: &mut dyn Output, preview: &PreviewResult) {
        for file in &preview.files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        out.preformatted(&format!("{} files would be generated", preview.files.len()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::BufferOutput;

    #[test]
    fn test_render_preview() {
        let report = GenerateReport {
            project_name: "demo".into(),
            marked_count: 1,
            reached_count: 0,
            warnings: vec!["warning: hint `Item.g` is used by 2 types".into()],
            result: GenerationResult::Preview(PreviewResult {
                files: vec![PreviewFile {
                    path: "Person.g.cs".into(),
                    content: "partial class Person {}".into(),
                }],
            }),
        };

        let mut out = BufferOutput::default();
        report.render(&mut out);

        assert_eq!(
            out.lines,
            vec![
                "warning: hint `Item.g` is used by 2 types",
                "",
                "── Person.g.cs ──",
                "partial class Person {}",
                "── Summary ──",
                "1 files would be generated",
            ]
        );
    }
}
