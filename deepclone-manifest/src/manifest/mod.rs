//! Project manifest types and parsing for deepclone.toml files.

mod file;
mod parse;

use std::path::PathBuf;

pub use file::ProjectFile;
pub use parse::parse_manifest;
use serde::Deserialize;

/// Default marker short name.
pub const DEFAULT_MARKER: &str = "DeepCloneable";
/// Default namespace the marker attribute is declared in.
pub const DEFAULT_MARKER_NAMESPACE: &str = "DeepClone.SourceGenerator";
/// Conventional attribute class suffix.
pub const ATTRIBUTE_SUFFIX: &str = "Attribute";

/// Root manifest for deepclone.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Project metadata
    pub project: ProjectConfig,

    /// Generator settings
    #[serde(default)]
    pub generator: GeneratorConfig,
}

/// `[project]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    pub name: String,

    /// Declaration files or directories, relative to the manifest.
    #[serde(default = "default_sources")]
    pub sources: Vec<PathBuf>,
}

fn default_sources() -> Vec<PathBuf> {
    vec![PathBuf::from("types")]
}

/// `[generator]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct GeneratorConfig {
    /// Short name of the marker attribute, without the `Attribute` suffix.
    pub marker: String,
    /// Namespace the marker attribute is emitted into.
    pub marker_namespace: String,
    /// Output directory, relative to the manifest.
    pub output: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            marker_namespace: DEFAULT_MARKER_NAMESPACE.to_string(),
            output: PathBuf::from("generated"),
        }
    }
}

impl GeneratorConfig {
    /// The marker name with any `Attribute` suffix removed.
    pub fn marker_short_name(&self) -> &str {
        match self.marker.strip_suffix(ATTRIBUTE_SUFFIX) {
            Some(short) if !short.is_empty() => short,
            _ => &self.marker,
        }
    }

    /// The marker attribute's class name.
    pub fn marker_class_name(&self) -> String {
        format!("{}{}", self.marker_short_name(), ATTRIBUTE_SUFFIX)
    }

    /// The marker namespace as path segments.
    pub fn marker_namespace_path(&self) -> Vec<String> {
        deepclone_core::split_path(&self.marker_namespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.marker_short_name(), "DeepCloneable");
        assert_eq!(config.marker_class_name(), "DeepCloneableAttribute");
        assert_eq!(config.marker_namespace_path(), vec!["DeepClone", "SourceGenerator"]);
    }

    #[test]
    fn test_marker_suffix_is_stripped() {
        let config = GeneratorConfig {
            marker: "CloneMeAttribute".into(),
            ..Default::default()
        };
        assert_eq!(config.marker_short_name(), "CloneMe");
        assert_eq!(config.marker_class_name(), "CloneMeAttribute");
    }

    #[test]
    fn test_bare_attribute_marker_kept() {
        let config = GeneratorConfig {
            marker: "Attribute".into(),
            ..Default::default()
        };
        assert_eq!(config.marker_short_name(), "Attribute");
    }
}
