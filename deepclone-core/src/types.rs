//! Fundamental type-declaration vocabulary shared by every crate.

use std::{fmt, str::FromStr};

use serde::Serialize;
use thiserror::Error;

/// Declared accessibility of a type.
///
/// Both `protected internal` and `internal protected` normalize to
/// [`Accessibility::ProtectedInternal`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    Public,
    #[default]
    Internal,
    Protected,
    ProtectedInternal,
}

impl Accessibility {
    /// The modifier spelling used in emitted source.
    pub fn keyword(&self) -> &'static str {
        match self {
            Accessibility::Public => "public",
            Accessibility::Internal => "internal",
            Accessibility::Protected => "protected",
            Accessibility::ProtectedInternal => "protected internal",
        }
    }
}

impl fmt::Display for Accessibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown accessibility '{0}'")]
pub struct UnknownAccessibility(pub String);

impl FromStr for Accessibility {
    type Err = UnknownAccessibility;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = s.split_whitespace().collect();
        match words.as_slice() {
            ["public"] => Ok(Accessibility::Public),
            ["internal"] => Ok(Accessibility::Internal),
            ["protected"] => Ok(Accessibility::Protected),
            ["protected", "internal"] | ["internal", "protected"] => {
                Ok(Accessibility::ProtectedInternal)
            }
            _ => Err(UnknownAccessibility(s.to_string())),
        }
    }
}

/// The declaration keyword of a type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    #[default]
    Class,
    Record,
    Struct,
}

impl TypeKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Record => "record",
            TypeKind::Struct => "struct",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown type kind '{0}'")]
pub struct UnknownTypeKind(pub String);

impl FromStr for TypeKind {
    type Err = UnknownTypeKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "class" => Ok(TypeKind::Class),
            "record" => Ok(TypeKind::Record),
            "struct" => Ok(TypeKind::Struct),
            other => Err(UnknownTypeKind(other.to_string())),
        }
    }
}

/// The kind of a type member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    #[default]
    Property,
    Field,
    Method,
}

impl MemberKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberKind::Property => "property",
            MemberKind::Field => "field",
            MemberKind::Method => "method",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessibility_parse() {
        assert_eq!("public".parse(), Ok(Accessibility::Public));
        assert_eq!("internal".parse(), Ok(Accessibility::Internal));
        assert_eq!("protected".parse(), Ok(Accessibility::Protected));
    }

    #[test]
    fn test_protected_internal_spellings_normalize() {
        let a: Accessibility = "protected internal".parse().unwrap();
        let b: Accessibility = "internal  protected".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.keyword(), "protected internal");
    }

    #[test]
    fn test_accessibility_rejects_unknown() {
        assert!("private".parse::<Accessibility>().is_err());
        assert!("".parse::<Accessibility>().is_err());
    }

    #[test]
    fn test_type_kind_keyword() {
        assert_eq!("record".parse::<TypeKind>().unwrap().keyword(), "record");
        assert!("interface".parse::<TypeKind>().is_err());
    }
}
