//! Validation context and utilities for declaration parsing.

use std::{ops::Range, sync::Arc};

use toml::Spanned;

use crate::{Result, error::SourceContext};

/// Parsing and validation context that carries source information.
///
/// Carries the source content and the path through the declaration
/// hierarchy (e.g. `Person.Name`) so nested errors can say where they are.
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    /// Source context for error reporting (shared across nested contexts)
    source: Arc<SourceContext>,
    /// Path segments for nested validation (e.g., ["Person", "Name"])
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    /// Create a new parse context with the given source and filename.
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        self.source.filename()
    }

    /// Get the source context for error creation.
    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut new_path = self.path.clone();
        new_path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path: new_path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Get a context description for error messages.
    ///
    /// For example: "member in 'Person'" or just "type" if no path.
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    /// Validate that a spanned name is a valid identifier.
    pub fn validate_name(&self, name: &Spanned<String>, kind: &str) -> Result<()> {
        self.validate_name_at(name.get_ref(), kind, name.span())
    }

    /// Validate that a name is a valid identifier, reporting errors at `span`.
    pub fn validate_name_at(&self, name: &str, kind: &str, span: Range<usize>) -> Result<()> {
        if is_csharp_keyword(name) {
            return Err(self
                .source
                .reserved_keyword_error(name, self.context_for(kind), span));
        }

        if let Some(reason) = validate_identifier(name) {
            return Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                span,
            ));
        }

        Ok(())
    }

    /// Validate every segment of a dotted path.
    pub fn validate_path(&self, segments: &[String], kind: &str, span: Range<usize>) -> Result<()> {
        for segment in segments {
            self.validate_name_at(segment, kind, span.clone())?;
        }
        Ok(())
    }
}

/// C# reserved keywords that cannot be used as plain identifiers.
pub(crate) const CSHARP_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// Check if a name is a C# reserved keyword
pub(crate) fn is_csharp_keyword(name: &str) -> bool {
    CSHARP_KEYWORDS.contains(&name)
}

/// Validate that a string is a valid identifier.
/// Returns None if valid, Some(reason) if invalid.
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();
    match chars.next() {
        None => Some("name cannot be empty"),
        Some(c) if c.is_ascii_digit() => Some("name cannot start with a digit"),
        Some(c) if !(c.is_alphabetic() || c == '_') => {
            Some("name must start with a letter or underscore")
        }
        Some(_) if chars.any(|c| !(c.is_alphanumeric() || c == '_')) => {
            Some("name contains invalid characters")
        }
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_identifier() {
        assert_eq!(validate_identifier("Person"), None);
        assert_eq!(validate_identifier("_cache2"), None);
        assert!(validate_identifier("").is_some());
        assert!(validate_identifier("2fast").is_some());
        assert!(validate_identifier("has-dash").is_some());
        assert!(validate_identifier("has space").is_some());
    }

    #[test]
    fn test_csharp_keywords() {
        assert!(is_csharp_keyword("class"));
        assert!(is_csharp_keyword("string"));
        assert!(!is_csharp_keyword("Person"));
        assert!(!is_csharp_keyword("record"));
    }

    #[test]
    fn test_context_for_nested_path() {
        let ctx = ParseContext::new("", "types.toml");
        assert_eq!(ctx.context_for("type"), "type");

        let nested = ctx.push("Person");
        assert_eq!(nested.context_for("member"), "member in 'Person'");
    }

    #[test]
    fn test_validate_name_at_reports_keyword() {
        let ctx = ParseContext::new("name = \"class\"", "types.toml");
        let err = ctx.validate_name_at("class", "type", 8..13).unwrap_err();
        assert!(matches!(*err, crate::Error::ReservedKeyword { .. }));
    }
}
