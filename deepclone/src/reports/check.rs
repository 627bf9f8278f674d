//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from a full analysis pass.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    /// Number of declaration files loaded.
    pub file_count: usize,
    /// Number of types in the symbol table.
    pub symbol_count: usize,
    /// Qualified names of marked types.
    pub marked: Vec<String>,
    /// Qualified names of types reached from marked types.
    pub reached: Vec<String>,
    pub plans: Vec<PlanSummary>,
    /// Error messages.
    pub errors: Vec<String>,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Info messages.
    pub infos: Vec<String>,
}

/// How each property of one type is cloned.
#[derive(Debug)]
pub struct PlanSummary {
    pub type_name: String,
    /// `(property, mode)` pairs in declaration order.
    pub properties: Vec<(String, String)>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.preformatted(&format!("error: {}", error));
        }

        for warning in &self.warnings {
            out.warning(warning);
        }

        for info in &self.infos {
            out.preformatted(&format!("info: {}", info));
        }

        if !self.warnings.is_empty() || !self.errors.is_empty() || !self.infos.is_empty() {
            out.newline();
        }

        if !self.is_valid() {
            return;
        }

        out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        out.key_value_indented("Files", &self.file_count.to_string());
        out.key_value_indented("Types", &self.symbol_count.to_string());
        out.newline();

        out.section("Marked");
        for name in &self.marked {
            out.list_item(name);
        }
        if !self.reached.is_empty() {
            out.section("Reached");
            for name in &self.reached {
                out.list_item(name);
            }
        }

        for plan in &self.plans {
            out.newline();
            out.section(&plan.type_name);
            for (i, (property, mode)) in plan.properties.iter().enumerate() {
                out.numbered_item(i + 1, &format!("{} ({})", property, mode));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::BufferOutput;

    fn report() -> CheckReport {
        CheckReport {
            config_path: PathBuf::from("deepclone.toml"),
            file_count: 1,
            symbol_count: 2,
            marked: vec!["Demo.Person".into()],
            reached: vec!["Demo.Address".into()],
            plans: vec![PlanSummary {
                type_name: "Demo.Person".into(),
                properties: vec![
                    ("Address".into(), "clone".into()),
                    ("Age".into(), "copy".into()),
                ],
            }],
            errors: vec![],
            warnings: vec![],
            infos: vec![],
        }
    }

    #[test]
    fn test_render_valid() {
        let mut out = BufferOutput::default();
        report().render(&mut out);

        assert_eq!(
            out.lines,
            vec![
                "✓ deepclone.toml is valid",
                "  Files: 1",
                "  Types: 2",
                "",
                "Marked:",
                "  - Demo.Person",
                "Reached:",
                "  - Demo.Address",
                "",
                "Demo.Person:",
                "  1. Address (clone)",
                "  2. Age (copy)",
            ]
        );
    }

    #[test]
    fn test_render_errors_only() {
        let mut report = report();
        report.errors.push("declaration conflict".into());

        let mut out = BufferOutput::default();
        report.render(&mut out);

        assert!(!report.is_valid());
        assert_eq!(out.lines, vec!["error: declaration conflict", ""]);
    }
}
