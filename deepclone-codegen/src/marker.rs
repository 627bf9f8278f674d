//! Recognition of the marker attribute.

use deepclone_core::join_path;
use deepclone_manifest::{ATTRIBUTE_SUFFIX, AttributeRef, GeneratorConfig};
use serde::Serialize;

/// The marker attribute the scanner looks for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MarkerConfig {
    /// Name without the `Attribute` suffix, e.g. `DeepCloneable`.
    pub short_name: String,
    /// Namespace the attribute is declared in.
    pub namespace: Vec<String>,
}

impl MarkerConfig {
    pub fn new(short_name: impl Into<String>, namespace: Vec<String>) -> Self {
        Self {
            short_name: short_name.into(),
            namespace,
        }
    }

    /// The attribute's class name, e.g. `DeepCloneableAttribute`.
    pub fn class_name(&self) -> String {
        format!("{}{}", self.short_name, ATTRIBUTE_SUFFIX)
    }

    pub fn qualified_class_name(&self) -> String {
        deepclone_core::qualified_name(&self.namespace, &self.class_name())
    }

    /// Whether the simple name is the marker's, with or without the suffix.
    pub fn matches_name(&self, attribute: &AttributeRef) -> bool {
        let name = attribute.simple_name();
        name == self.short_name || name == self.class_name()
    }

    /// Whether the attribute is the marker: a matching simple name, either
    /// unqualified or qualified by the marker namespace.
    pub fn matches(&self, attribute: &AttributeRef) -> bool {
        if !self.matches_name(attribute) {
            return false;
        }
        let qualifier = attribute.qualifier();
        qualifier.is_empty() || qualifier == self.namespace.as_slice()
    }

    pub fn namespace_string(&self) -> String {
        join_path(&self.namespace)
    }
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self::from(&GeneratorConfig::default())
    }
}

impl From<&GeneratorConfig> for MarkerConfig {
    fn from(config: &GeneratorConfig) -> Self {
        Self::new(config.marker_short_name(), config.marker_namespace_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(s: &str) -> AttributeRef {
        s.parse().unwrap()
    }

    #[test]
    fn test_matches_with_and_without_suffix() {
        let marker = MarkerConfig::default();
        assert!(marker.matches(&attr("DeepCloneable")));
        assert!(marker.matches(&attr("DeepCloneableAttribute")));
        assert!(marker.matches(&attr("DeepClone.SourceGenerator.DeepCloneable")));
        assert!(marker.matches(&attr(
            "global::DeepClone.SourceGenerator.DeepCloneableAttribute()"
        )));
    }

    #[test]
    fn test_rejects_foreign_namespace() {
        let marker = MarkerConfig::default();
        let foreign = attr("Other.Library.DeepCloneable");
        assert!(marker.matches_name(&foreign));
        assert!(!marker.matches(&foreign));
        assert!(!marker.matches(&attr("Serializable")));
    }

    #[test]
    fn test_class_names() {
        let marker = MarkerConfig::default();
        assert_eq!(marker.class_name(), "DeepCloneableAttribute");
        assert_eq!(
            marker.qualified_class_name(),
            "DeepClone.SourceGenerator.DeepCloneableAttribute"
        );
    }
}
