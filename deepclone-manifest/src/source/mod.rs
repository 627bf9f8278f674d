//! Declaration files: the type declarations the generator analyzes.
//!
//! Each declaration file is one tree of the syntax forest. Raw TOML is
//! deserialized with spans, then lowered into validated [`TypeDecl`]s.

mod attribute;
mod type_expr;

use std::{collections::HashMap, path::Path, str::FromStr};

use deepclone_core::{Accessibility, MemberKind, TypeKind, split_path};
use serde::Deserialize;
use toml::Spanned;

pub use attribute::{AttributeRef, AttributeRefError};
pub use type_expr::{BUILTIN_TYPES, TypeExpr, TypeExprError};

use crate::{Error, Result, validate::ParseContext};

/// One parsed declaration file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceFile {
    /// Display path used in diagnostics.
    pub path: String,
    /// File-scoped namespace (empty for the global namespace).
    pub namespace: Vec<String>,
    /// Namespaces imported with `using`.
    pub usings: Vec<Vec<String>>,
    /// Type declarations in file order.
    pub types: Vec<TypeDecl>,
}

/// A type declaration fragment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDecl {
    pub name: String,
    pub namespace: Vec<String>,
    pub kind: TypeKind,
    /// `None` when the fragment does not spell an accessibility.
    pub accessibility: Option<Accessibility>,
    pub modifiers: Modifiers,
    pub attributes: Vec<AttributeRef>,
    pub members: Vec<MemberDecl>,
}

/// Declaration-form flags of a fragment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub is_partial: bool,
    pub is_static: bool,
    pub is_sealed: bool,
    pub is_abstract: bool,
}

/// A member of a type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberDecl {
    pub name: String,
    pub ty: TypeExpr,
    pub kind: MemberKind,
    pub is_static: bool,
    pub readable: bool,
    pub writable: bool,
}

impl SourceFile {
    /// Parse a declaration file from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse a declaration file with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let ctx = ParseContext::new(content, filename);
        let raw: RawSourceFile =
            toml::from_str(content).map_err(|e| ctx.source_context().parse_error(e))?;
        raw.lower(&ctx)
    }
}

impl FromStr for SourceFile {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "types.toml")
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSourceFile {
    namespace: Option<Spanned<String>>,
    #[serde(default)]
    usings: Vec<Spanned<String>>,
    #[serde(default)]
    types: Vec<RawTypeDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTypeDecl {
    name: Spanned<String>,
    namespace: Option<Spanned<String>>,
    kind: Option<Spanned<String>>,
    accessibility: Option<Spanned<String>>,
    #[serde(default)]
    modifiers: Vec<Spanned<String>>,
    #[serde(default)]
    attributes: Vec<Spanned<String>>,
    #[serde(default)]
    members: Vec<RawMemberDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMemberDecl {
    name: Spanned<String>,
    #[serde(rename = "type")]
    ty: Spanned<String>,
    kind: Option<Spanned<String>>,
    accessors: Option<Vec<Spanned<String>>>,
    #[serde(rename = "static", default)]
    is_static: bool,
}

fn parse_namespace(ctx: &ParseContext<'_>, raw: &Spanned<String>) -> Result<Vec<String>> {
    let segments = split_path(raw.get_ref());
    ctx.validate_path(&segments, "namespace", raw.span())?;
    Ok(segments)
}

impl RawSourceFile {
    fn lower(self, ctx: &ParseContext<'_>) -> Result<SourceFile> {
        let namespace = match &self.namespace {
            Some(ns) => parse_namespace(ctx, ns)?,
            None => Vec::new(),
        };

        let usings = self
            .usings
            .iter()
            .map(|u| parse_namespace(ctx, u))
            .collect::<Result<Vec<_>>>()?;

        let types = self
            .types
            .iter()
            .map(|ty| ty.lower(ctx, &namespace))
            .collect::<Result<Vec<_>>>()?;

        Ok(SourceFile {
            path: ctx.filename().to_string(),
            namespace,
            usings,
            types,
        })
    }
}

impl RawTypeDecl {
    fn lower(&self, ctx: &ParseContext<'_>, file_namespace: &[String]) -> Result<TypeDecl> {
        let src = ctx.source_context();
        ctx.validate_name(&self.name, "type")?;
        let type_ctx = ctx.push(self.name.get_ref());

        let namespace = match &self.namespace {
            Some(ns) => parse_namespace(ctx, ns)?,
            None => file_namespace.to_vec(),
        };

        let kind = match &self.kind {
            Some(kind) => kind.get_ref().parse::<TypeKind>().map_err(|e| {
                src.validation_error(format!("{}; expected class, record or struct", e), kind.span())
            })?,
            None => TypeKind::default(),
        };

        let accessibility = match &self.accessibility {
            Some(acc) => Some(
                acc.get_ref()
                    .parse::<Accessibility>()
                    .map_err(|_| src.unknown_accessibility_error(acc.get_ref(), acc.span()))?,
            ),
            None => None,
        };

        let mut modifiers = Modifiers::default();
        for modifier in &self.modifiers {
            match modifier.get_ref().as_str() {
                "partial" => modifiers.is_partial = true,
                "static" => modifiers.is_static = true,
                "sealed" => modifiers.is_sealed = true,
                "abstract" => modifiers.is_abstract = true,
                other => return Err(src.unknown_modifier_error(other, modifier.span())),
            }
        }

        let attributes = self
            .attributes
            .iter()
            .map(|attr| {
                attr.get_ref()
                    .parse::<AttributeRef>()
                    .map_err(|e| src.validation_error(format!("invalid attribute: {}", e), attr.span()))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut seen: HashMap<&str, &Spanned<String>> = HashMap::new();
        let mut members = Vec::with_capacity(self.members.len());
        for member in &self.members {
            if let Some(first) = seen.insert(member.name.get_ref(), &member.name) {
                return Err(src.duplicate_member_error(
                    member.name.get_ref(),
                    self.name.get_ref(),
                    first.span(),
                    member.name.span(),
                ));
            }
            members.push(member.lower(&type_ctx)?);
        }

        Ok(TypeDecl {
            name: self.name.get_ref().clone(),
            namespace,
            kind,
            accessibility,
            modifiers,
            attributes,
            members,
        })
    }
}

impl RawMemberDecl {
    fn lower(&self, ctx: &ParseContext<'_>) -> Result<MemberDecl> {
        let src = ctx.source_context();
        ctx.validate_name(&self.name, "member")?;

        let ty = self.ty.get_ref().parse::<TypeExpr>().map_err(|e| {
            src.invalid_type_error(self.ty.get_ref(), e.reason, self.ty.span())
        })?;

        let kind = match &self.kind {
            Some(kind) => match kind.get_ref().as_str() {
                "property" => MemberKind::Property,
                "field" => MemberKind::Field,
                "method" => MemberKind::Method,
                other => {
                    return Err(src.validation_error(
                        format!("unknown member kind '{}'; expected property, field or method", other),
                        kind.span(),
                    ));
                }
            },
            None => MemberKind::default(),
        };

        let (readable, writable) = match kind {
            MemberKind::Property => match &self.accessors {
                Some(accessors) => {
                    let mut readable = false;
                    let mut writable = false;
                    for accessor in accessors {
                        match accessor.get_ref().as_str() {
                            "get" => readable = true,
                            "set" | "init" => writable = true,
                            other => {
                                return Err(src.validation_error(
                                    format!("unknown accessor '{}'; expected get, set or init", other),
                                    accessor.span(),
                                ));
                            }
                        }
                    }
                    (readable, writable)
                }
                None => (true, true),
            },
            MemberKind::Field => (true, true),
            MemberKind::Method => (false, false),
        };

        Ok(MemberDecl {
            name: self.name.get_ref().clone(),
            ty,
            kind,
            is_static: self.is_static,
            readable,
            writable,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<SourceFile> {
        content.parse()
    }

    #[test]
    fn test_parse_full_declaration() {
        let file = parse(
            r#"
            namespace = "Demo.Models"
            usings = ["Demo.Shared"]

            [[types]]
            name = "Person"
            accessibility = "internal"
            modifiers = ["sealed", "partial"]
            attributes = ["DeepCloneable"]

            [[types.members]]
            name = "Name"
            type = "Name?"

            [[types.members]]
            name = "Age"
            type = "int"
            accessors = ["get"]
            "#,
        )
        .unwrap();

        assert_eq!(file.namespace, vec!["Demo", "Models"]);
        assert_eq!(file.usings, vec![vec!["Demo".to_string(), "Shared".to_string()]]);

        let person = &file.types[0];
        assert_eq!(person.name, "Person");
        assert_eq!(person.namespace, vec!["Demo", "Models"]);
        assert_eq!(person.accessibility, Some(Accessibility::Internal));
        assert!(person.modifiers.is_partial);
        assert!(person.modifiers.is_sealed);
        assert!(!person.modifiers.is_static);
        assert_eq!(person.attributes[0].simple_name(), "DeepCloneable");

        assert_eq!(person.members.len(), 2);
        assert!(person.members[0].writable);
        assert!(person.members[1].readable);
        assert!(!person.members[1].writable);
    }

    #[test]
    fn test_type_namespace_overrides_file() {
        let file = parse(
            r#"
            namespace = "A"

            [[types]]
            name = "Foo"
            namespace = "B.C"
            "#,
        )
        .unwrap();
        assert_eq!(file.types[0].namespace, vec!["B", "C"]);
    }

    #[test]
    fn test_defaults() {
        let file = parse(
            r#"
            [[types]]
            name = "Foo"

            [[types.members]]
            name = "Count"
            type = "int"
            "#,
        )
        .unwrap();

        let foo = &file.types[0];
        assert!(foo.namespace.is_empty());
        assert_eq!(foo.kind, TypeKind::Class);
        assert_eq!(foo.accessibility, None);
        assert_eq!(foo.members[0].kind, MemberKind::Property);
        assert!(foo.members[0].readable && foo.members[0].writable);
    }

    #[test]
    fn test_init_accessor_is_writable() {
        let file = parse(
            r#"
            [[types]]
            name = "Foo"

            [[types.members]]
            name = "Id"
            type = "int"
            accessors = ["get", "init"]
            "#,
        )
        .unwrap();
        assert!(file.types[0].members[0].writable);
    }

    #[test]
    fn test_rejects_unknown_modifier() {
        let err = parse(
            r#"
            [[types]]
            name = "Foo"
            modifiers = ["partial", "virtual"]
            "#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::UnknownModifier { ref modifier, .. } if modifier == "virtual"));
    }

    #[test]
    fn test_rejects_unknown_accessibility() {
        let err = parse(
            r#"
            [[types]]
            name = "Foo"
            accessibility = "private"
            "#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::UnknownAccessibility { .. }));
    }

    #[test]
    fn test_rejects_keyword_type_name() {
        let err = parse(
            r#"
            [[types]]
            name = "class"
            "#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::ReservedKeyword { .. }));
    }

    #[test]
    fn test_rejects_duplicate_member() {
        let err = parse(
            r#"
            [[types]]
            name = "Foo"

            [[types.members]]
            name = "A"
            type = "int"

            [[types.members]]
            name = "A"
            type = "string"
            "#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::DuplicateMember { ref name, .. } if name == "A"));
    }

    #[test]
    fn test_rejects_bad_type_expression() {
        let err = parse(
            r#"
            [[types]]
            name = "Foo"

            [[types.members]]
            name = "A"
            type = "List<int"
            "#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::InvalidType { .. }));
    }

    #[test]
    fn test_rejects_unknown_field() {
        let err = parse(
            r#"
            [[types]]
            name = "Foo"
            colour = "blue"
            "#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }
}
