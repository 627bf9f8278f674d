//! Attribute references as written on a declaration.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// An attribute name as written, e.g. `DeepCloneable` or
/// `global::DeepClone.SourceGenerator.DeepCloneableAttribute("x")`.
///
/// Only the name is kept. Argument lists are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeRef {
    path: Vec<String>,
}

impl AttributeRef {
    /// The rightmost name segment.
    pub fn simple_name(&self) -> &str {
        self.path.last().map_or("", String::as_str)
    }

    /// Leading segments before the simple name (empty when unqualified).
    pub fn qualifier(&self) -> &[String] {
        &self.path[..self.path.len().saturating_sub(1)]
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }
}

impl fmt::Display for AttributeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path.join("."))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct AttributeRefError(pub &'static str);

impl FromStr for AttributeRef {
    type Err = AttributeRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = match s.find('(') {
            Some(open) if s.trim_end().ends_with(')') => &s[..open],
            Some(_) => return Err(AttributeRefError("unterminated argument list")),
            None => s,
        };
        let name = name.trim();
        let name = name.strip_prefix("global::").unwrap_or(name);

        let path: Vec<String> = name.split('.').map(|seg| seg.trim().to_string()).collect();
        if path.iter().any(String::is_empty) {
            return Err(AttributeRefError("attribute name has an empty segment"));
        }

        Ok(Self { path })
    }
}
