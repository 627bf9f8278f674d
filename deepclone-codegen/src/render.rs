//! C# source text for generated units.

use deepclone_core::join_path;
use deepclone_ir::{ClonePlan, PropertyPlan};

use crate::{MarkerConfig, builder::CodeBuilder};

/// Tool name recorded in `GeneratedCode` attributes.
pub const GENERATOR_NAME: &str = "DeepClone.SourceGenerator";
/// Tool version recorded in `GeneratedCode` attributes.
pub const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the generated method.
pub const CLONE_METHOD: &str = "DeepClone";

fn header(namespace: &[String]) -> CodeBuilder {
    CodeBuilder::csharp()
        .line("// <auto-generated/>")
        .line("#nullable enable")
        .blank()
        .when(!namespace.is_empty(), |b| {
            b.line(&format!("namespace {};", join_path(namespace))).blank()
        })
}

fn generated_code_attribute() -> String {
    format!(
        "[global::System.CodeDom.Compiler.GeneratedCode(\"{}\", \"{}\")]",
        GENERATOR_NAME, GENERATOR_VERSION
    )
}

fn assignment(property: &PropertyPlan) -> String {
    let name = &property.name;
    match (property.recursive, property.null_guard) {
        (true, true) => format!("{name} = this.{name}?.{CLONE_METHOD}(),"),
        (true, false) => format!("{name} = this.{name}.{CLONE_METHOD}(),"),
        (false, _) => format!("{name} = this.{name},"),
    }
}

/// Render the partial declaration that adds `DeepClone()` to a type.
pub fn render_clone_unit(plan: &ClonePlan) -> String {
    let declaration = format!(
        "{} partial {} {}",
        plan.accessibility.keyword(),
        plan.kind.keyword(),
        plan.name
    );
    let method = format!("public {} {}()", plan.name, CLONE_METHOD);

    header(&plan.namespace)
        .block(&declaration, |b| {
            b.line(&generated_code_attribute()).block(&method, |b| {
                if plan.properties.is_empty() {
                    b.line(&format!("return new {}();", plan.name))
                } else {
                    b.block_with_close(&format!("return new {}", plan.name), "};", |b| {
                        b.each(&plan.properties, |b, p| b.line(&assignment(p)))
                    })
                }
            })
        })
        .build()
}

/// Render the marker attribute's own declaration.
pub fn render_marker_attribute(marker: &MarkerConfig) -> String {
    header(&marker.namespace)
        .line(
            "[global::System.AttributeUsage(global::System.AttributeTargets.Class | \
             global::System.AttributeTargets.Struct, Inherited = false, AllowMultiple = false)]",
        )
        .line(&generated_code_attribute())
        .block(
            &format!(
                "internal sealed class {} : global::System.Attribute",
                marker.class_name()
            ),
            |b| b,
        )
        .build()
}

#[cfg(test)]
mod tests {
    use deepclone_core::{Accessibility, TypeKind};

    use super::*;

    fn plan(namespace: &[&str], properties: Vec<PropertyPlan>) -> ClonePlan {
        ClonePlan {
            namespace: namespace.iter().map(|s| s.to_string()).collect(),
            name: "Person".into(),
            kind: TypeKind::Class,
            accessibility: Accessibility::Public,
            properties,
        }
    }

    fn property(name: &str, recursive: bool, null_guard: bool) -> PropertyPlan {
        PropertyPlan {
            name: name.into(),
            recursive,
            null_guard,
            element_recursive: false,
        }
    }

    #[test]
    fn test_assignments() {
        assert_eq!(assignment(&property("Age", false, true)), "Age = this.Age,");
        assert_eq!(
            assignment(&property("Name", true, true)),
            "Name = this.Name?.DeepClone(),"
        );
        assert_eq!(
            assignment(&property("Point", true, false)),
            "Point = this.Point.DeepClone(),"
        );
    }

    #[test]
    fn test_empty_plan_constructs_bare_instance() {
        let source = render_clone_unit(&plan(&["Demo"], vec![]));
        assert!(source.contains("namespace Demo;\n"));
        assert!(source.contains("        return new Person();\n"));
        assert!(!source.contains("return new Person\n"));
    }

    #[test]
    fn test_global_namespace_has_no_namespace_line() {
        let source = render_clone_unit(&plan(&[], vec![property("Age", false, true)]));
        assert!(source.starts_with("// <auto-generated/>\n#nullable enable\n\npublic partial class Person\n"));
        assert!(!source.contains("namespace"));
    }

    #[test]
    fn test_marker_attribute_class() {
        let source = render_marker_attribute(&MarkerConfig::default());
        assert!(source.contains("namespace DeepClone.SourceGenerator;\n"));
        assert!(source.contains(
            "internal sealed class DeepCloneableAttribute : global::System.Attribute\n{\n}\n"
        ));
    }
}
