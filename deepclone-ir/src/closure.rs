//! The set of types that receive a generated clone method.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::TypeId;

/// Types that must receive a generated clone method.
///
/// Always a superset of the explicitly marked types. Iteration order is
/// ascending [`TypeId`], which is qualified-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ClosureSet {
    marked: BTreeSet<TypeId>,
    members: BTreeSet<TypeId>,
}

impl ClosureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a type reached by traversal. Returns false if already present.
    pub fn insert(&mut self, id: TypeId) -> bool {
        self.members.insert(id)
    }

    /// Record a type as explicitly marked. It must already be a member.
    pub fn mark(&mut self, id: TypeId) {
        if self.members.contains(&id) {
            self.marked.insert(id);
        }
    }

    pub fn contains(&self, id: TypeId) -> bool {
        self.members.contains(&id)
    }

    pub fn is_marked(&self, id: TypeId) -> bool {
        self.marked.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.members.iter().copied()
    }

    /// Members that were not explicitly marked.
    pub fn reached(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.members.difference(&self.marked).copied()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
