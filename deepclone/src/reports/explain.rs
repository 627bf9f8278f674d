//! Explain command report data structures.

use deepclone_codegen::{Explanation, Reason};

use super::output::{Output, Report};

/// Report data from explaining a single type.
#[derive(Debug)]
pub struct ExplainReport {
    /// Qualified name of the marker attribute class.
    pub marker: String,
    pub explanation: Explanation,
}

impl Report for ExplainReport {
    fn render(&self, out: &mut dyn Output) {
        let explanation = &self.explanation;
        let verdict = if explanation.in_closure {
            "generated"
        } else {
            "not generated"
        };
        out.key_value(&explanation.type_name, verdict);

        match &explanation.reason {
            Reason::Marked => {
                out.preformatted(&format!("  marked with [{}]", self.marker));
            }
            Reason::Reached { chain } => {
                let path = chain
                    .iter()
                    .map(|step| format!("{}.{}", step.type_name, step.member))
                    .collect::<Vec<_>>()
                    .join(" -> ");
                out.preformatted("  reached through");
                out.list_item(&format!("{} -> {}", path, explanation.type_name));
            }
            Reason::NotExtensible {
                is_partial,
                is_static,
            } => {
                if !is_partial {
                    out.list_item("type is not declared partial");
                }
                if *is_static {
                    out.list_item("type is static");
                }
            }
            Reason::Unreachable => {
                out.preformatted(&format!(
                    "  not marked with [{}] and not referenced by any marked type",
                    self.marker
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use deepclone_codegen::ChainStep;

    use super::*;
    use crate::reports::output::BufferOutput;

    fn render(reason: Reason, in_closure: bool) -> Vec<String> {
        let report = ExplainReport {
            marker: "DeepClone.SourceGenerator.DeepCloneableAttribute".into(),
            explanation: Explanation {
                type_name: "Demo.Street".into(),
                in_closure,
                reason,
            },
        };
        let mut out = BufferOutput::default();
        report.render(&mut out);
        out.lines
    }

    #[test]
    fn test_render_chain() {
        let lines = render(
            Reason::Reached {
                chain: vec![
                    ChainStep {
                        type_name: "Demo.Person".into(),
                        member: "Address".into(),
                    },
                    ChainStep {
                        type_name: "Demo.Address".into(),
                        member: "Street".into(),
                    },
                ],
            },
            true,
        );

        assert_eq!(
            lines,
            vec![
                "Demo.Street: generated",
                "  reached through",
                "  - Demo.Person.Address -> Demo.Address.Street -> Demo.Street",
            ]
        );
    }

    #[test]
    fn test_render_not_extensible() {
        let lines = render(
            Reason::NotExtensible {
                is_partial: false,
                is_static: true,
            },
            false,
        );

        assert_eq!(
            lines,
            vec![
                "Demo.Street: not generated",
                "  - type is not declared partial",
                "  - type is static",
            ]
        );
    }
}
