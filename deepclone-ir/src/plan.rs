//! Per-type clone plans.

use deepclone_core::{Accessibility, TypeKind, qualified_name};
use serde::Serialize;

/// How one type's clone method is built.
///
/// A plan carries no arena ids, so plans of an unchanged type compare equal
/// across passes even when other types shift the symbol table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ClonePlan {
    pub namespace: Vec<String>,
    pub name: String,
    pub kind: TypeKind,
    pub accessibility: Accessibility,
    /// Members in declaration order.
    pub properties: Vec<PropertyPlan>,
}

/// How one member is copied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PropertyPlan {
    pub name: String,
    /// Copy by calling the member type's own generated clone method.
    pub recursive: bool,
    /// The value may be absent, so the recursive call must be guarded.
    /// Only false for a non-nullable member of struct type.
    pub null_guard: bool,
    /// The member is a collection whose element type has a generated clone
    /// method. The collection itself is still copied by value.
    pub element_recursive: bool,
}

impl ClonePlan {
    pub fn qualified_name(&self) -> String {
        qualified_name(&self.namespace, &self.name)
    }

    pub fn recursive_properties(&self) -> impl Iterator<Item = &PropertyPlan> {
        self.properties.iter().filter(|p| p.recursive)
    }
}
