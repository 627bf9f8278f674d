//! Resolved type symbols, stored in an arena indexed by [`TypeId`].

use std::{fmt, hash::Hash};

use deepclone_core::{Accessibility, MemberKind, TypeKind, qualified_name};
use indexmap::IndexMap;
use serde::Serialize;

/// Index of a symbol in a [`SymbolTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TypeId(pub u32);

impl TypeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A member's declared type after binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeRef {
    /// A type declared in the analyzed forest.
    Named { id: TypeId },
    /// A type the generator knows nothing about (built-ins, library types).
    External { name: String },
    /// An array or generic instantiation. Elements are bound recursively
    /// but the container itself is never cloned.
    Collection { elements: Vec<TypeRef> },
}

impl TypeRef {
    /// The declared type when it names an analyzed type.
    pub fn named(&self) -> Option<TypeId> {
        match self {
            TypeRef::Named { id } => Some(*id),
            _ => None,
        }
    }

    /// Every analyzed type named anywhere inside a collection reference.
    pub fn element_ids(&self) -> Vec<TypeId> {
        let mut ids = Vec::new();
        if let TypeRef::Collection { elements } = self {
            for element in elements {
                collect_named(element, &mut ids);
            }
        }
        ids
    }
}

fn collect_named(ty: &TypeRef, out: &mut Vec<TypeId>) {
    match ty {
        TypeRef::Named { id } => out.push(*id),
        TypeRef::External { .. } => {}
        TypeRef::Collection { elements } => {
            for element in elements {
                collect_named(element, out);
            }
        }
    }
}

/// A member of a resolved type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MemberSymbol {
    pub name: String,
    /// The type as spelled in the declaration.
    pub declared_type: String,
    pub ty: TypeRef,
    /// The declared type carries a nullable `?` suffix.
    pub nullable: bool,
    pub kind: MemberKind,
    pub is_static: bool,
    pub readable: bool,
    pub writable: bool,
}

impl MemberSymbol {
    /// Members that take part in cloning: readable and writable properties.
    ///
    /// Static properties are not filtered out.
    pub fn is_clone_candidate(&self) -> bool {
        self.kind == MemberKind::Property && self.readable && self.writable
    }
}

/// The resolved identity of a type, merged across partial fragments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeSymbol {
    pub id: TypeId,
    pub namespace: Vec<String>,
    pub name: String,
    pub kind: TypeKind,
    pub accessibility: Accessibility,
    /// Every fragment is declared `partial`.
    pub is_partial: bool,
    /// Some fragment is declared `static`.
    pub is_static: bool,
    /// Number of declaration fragments merged into this symbol.
    pub fragments: usize,
    pub members: Vec<MemberSymbol>,
}

impl TypeSymbol {
    /// Whether generated members can be added to this type.
    pub fn is_extensible(&self) -> bool {
        self.is_partial && !self.is_static
    }

    pub fn qualified_name(&self) -> String {
        qualified_name(&self.namespace, &self.name)
    }
}

/// Arena of resolved symbols.
///
/// Ids are dense and assigned by the resolver in qualified-name order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SymbolTable {
    symbols: Vec<TypeSymbol>,
    #[serde(skip)]
    by_name: IndexMap<String, TypeId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol under its qualified name, assigning the next id.
    ///
    /// The symbol's `id` field is overwritten. Returns the existing id if the
    /// name is already taken.
    pub fn insert(&mut self, mut symbol: TypeSymbol) -> TypeId {
        let key = symbol.qualified_name();
        if let Some(id) = self.by_name.get(&key) {
            return *id;
        }
        let id = TypeId(self.symbols.len() as u32);
        symbol.id = id;
        self.symbols.push(symbol);
        self.by_name.insert(key, id);
        id
    }

    pub fn get(&self, id: TypeId) -> Option<&TypeSymbol> {
        self.symbols.get(id.index())
    }

    pub fn get_mut(&mut self, id: TypeId) -> Option<&mut TypeSymbol> {
        self.symbols.get_mut(id.index())
    }

    /// Find a symbol by fully-qualified name.
    pub fn lookup(&self, qualified: &str) -> Option<TypeId> {
        self.by_name.get(qualified).copied()
    }

    /// Find every symbol with the given simple name.
    pub fn lookup_simple(&self, name: &str) -> Vec<TypeId> {
        self.symbols
            .iter()
            .filter(|s| s.name == name)
            .map(|s| s.id)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeSymbol> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

// The name index is derived from `symbols`, so equality and hashing only
// look at the symbols themselves.
impl PartialEq for SymbolTable {
    fn eq(&self, other: &Self) -> bool {
        self.symbols == other.symbols
    }
}

impl Eq for SymbolTable {}

impl Hash for SymbolTable {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.symbols.hash(state);
    }
}
