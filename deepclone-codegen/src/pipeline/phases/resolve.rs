//! Resolve phase - merges declaration fragments into symbols.
//!
//! Every fragment in the forest contributes to the symbol table, not just
//! the marked ones: the closure builder has to see types that are reachable
//! from a marked type but carry no marker themselves.

use std::collections::{BTreeMap, BTreeSet};

use deepclone_core::{Accessibility, qualified_name};
use deepclone_ir::{MemberSymbol, SymbolTable, TypeId, TypeRef, TypeSymbol};
use deepclone_manifest::{SourceFile, SyntaxForest, TypeDecl, TypeExpr};
use eyre::Result;
use serde::Serialize;

use super::TypeCandidate;
use crate::{
    memo::Fingerprint,
    pipeline::{CancellationToken, CompilationContext, Diagnostic, Phase},
};

/// Output of the resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Resolution {
    pub table: SymbolTable,
    /// Symbols with at least one marked fragment.
    pub marked: BTreeSet<TypeId>,
    /// Marked candidates that did not bind to a symbol.
    pub dropped: Vec<DroppedCandidate>,
}

/// A marked candidate the resolver could not bind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DroppedCandidate {
    pub name: String,
    pub reason: String,
}

/// Phase that builds the symbol table and binds the marked candidates.
pub struct ResolvePhase;

impl Phase for ResolvePhase {
    fn name(&self) -> &'static str {
        "resolve"
    }

    fn description(&self) -> &'static str {
        "Merge partial declarations into symbols and bind member types"
    }

    fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let forest = ctx.forest;
        let cancel = ctx.cancellation().clone();
        let candidates = &ctx.candidates;

        let key = Fingerprint::of(&(forest, candidates));
        let resolution = ctx
            .caches
            .resolve
            .get_or_compute(key, || resolve(forest, candidates, &cancel))?;

        for dropped in &resolution.dropped {
            ctx.diagnostics.push(
                Diagnostic::warning(
                    self.name(),
                    format!("`{}` was not generated: {}", dropped.name, dropped.reason),
                )
                .at(dropped.name.clone()),
            );
        }

        tracing::debug!(
            symbols = resolution.table.len(),
            marked = resolution.marked.len(),
            dropped = resolution.dropped.len(),
            "resolve complete"
        );
        ctx.resolution = Some(resolution);
        Ok(())
    }
}

/// Fragments of one qualified name, in forest order.
type Fragments<'f> = Vec<(&'f SourceFile, &'f TypeDecl)>;

/// Build the symbol table for a forest and bind the marked candidates to it.
///
/// Ids follow qualified-name order, so an unchanged forest always yields an
/// identical table.
pub fn resolve(
    forest: &SyntaxForest,
    candidates: &[TypeCandidate],
    cancel: &CancellationToken,
) -> Result<Resolution> {
    let mut groups: BTreeMap<String, Fragments<'_>> = BTreeMap::new();
    for (_, file, decl) in forest.declarations() {
        groups
            .entry(qualified_name(&decl.namespace, &decl.name))
            .or_default()
            .push((file, decl));
    }

    let mut table = SymbolTable::new();
    let mut failures = BTreeMap::new();
    let mut bound = Vec::new();
    for (name, fragments) in &groups {
        cancel.checkpoint()?;
        match merge_header(fragments) {
            Ok(symbol) => bound.push((table.insert(symbol), fragments)),
            Err(reason) => {
                tracing::debug!(type_name = %name, %reason, "type did not resolve");
                failures.insert(name.as_str(), reason);
            }
        }
    }

    // Members bind after every header is in the table so forward and
    // cyclic references resolve.
    for (id, fragments) in bound {
        cancel.checkpoint()?;
        let lookup = &table;
        let members = fragments
            .iter()
            .flat_map(|&(file, decl)| {
                let scope = Scope { file, decl };
                decl.members.iter().map(move |m| MemberSymbol {
                    name: m.name.clone(),
                    declared_type: m.ty.to_string(),
                    ty: scope.bind(&m.ty, lookup),
                    nullable: matches!(m.ty, TypeExpr::Nullable(_)),
                    kind: m.kind,
                    is_static: m.is_static,
                    readable: m.readable,
                    writable: m.writable,
                })
            })
            .collect::<Vec<_>>();
        if let Some(symbol) = table.get_mut(id) {
            symbol.members = members;
        }
    }

    let mut marked = BTreeSet::new();
    let mut dropped = Vec::new();
    for candidate in candidates {
        match table.lookup(&candidate.name) {
            Some(id) => {
                marked.insert(id);
            }
            None => {
                let reason = failures
                    .get(candidate.name.as_str())
                    .cloned()
                    .unwrap_or_else(|| "no symbol for this declaration".to_string());
                let entry = DroppedCandidate {
                    name: candidate.name.clone(),
                    reason,
                };
                if !dropped.contains(&entry) {
                    dropped.push(entry);
                }
            }
        }
    }

    Ok(Resolution {
        table,
        marked,
        dropped,
    })
}

/// Merge the declaration-level facts of a type's fragments.
fn merge_header(fragments: &[(&SourceFile, &TypeDecl)]) -> Result<TypeSymbol, String> {
    let Some((_, first)) = fragments.first() else {
        return Err("no declaration fragments".to_string());
    };

    let mut accessibility: Option<Accessibility> = None;
    for (_, decl) in fragments {
        if decl.kind != first.kind {
            return Err(format!(
                "fragments disagree on the kind of the type ({} and {})",
                first.kind.keyword(),
                decl.kind.keyword()
            ));
        }
        match (accessibility, decl.accessibility) {
            (Some(seen), Some(declared)) if seen != declared => {
                return Err(format!(
                    "fragments disagree on accessibility ({} and {})",
                    seen, declared
                ));
            }
            (None, declared) => accessibility = declared,
            _ => {}
        }
    }

    Ok(TypeSymbol {
        id: TypeId(0),
        namespace: first.namespace.clone(),
        name: first.name.clone(),
        kind: first.kind,
        accessibility: accessibility.unwrap_or_default(),
        is_partial: fragments.iter().all(|(_, d)| d.modifiers.is_partial),
        is_static: fragments.iter().any(|(_, d)| d.modifiers.is_static),
        fragments: fragments.len(),
        members: Vec::new(),
    })
}

/// Name-lookup scope of one fragment.
#[derive(Clone, Copy)]
struct Scope<'f> {
    file: &'f SourceFile,
    decl: &'f TypeDecl,
}

impl Scope<'_> {
    fn bind(&self, ty: &TypeExpr, table: &SymbolTable) -> TypeRef {
        match ty {
            TypeExpr::Builtin(name) => TypeRef::External { name: name.clone() },
            TypeExpr::Nullable(inner) => self.bind(inner, table),
            TypeExpr::Array(inner) => TypeRef::Collection {
                elements: vec![self.bind(inner, table)],
            },
            TypeExpr::Named { args, .. } if !args.is_empty() => TypeRef::Collection {
                elements: args.iter().map(|arg| self.bind(arg, table)).collect(),
            },
            TypeExpr::Named { global, path, .. } => match self.lookup(*global, path, table) {
                Some(id) => TypeRef::Named { id },
                None => TypeRef::External {
                    name: ty.to_string(),
                },
            },
        }
    }

    /// Enclosing namespaces innermost-out (the global namespace last), then
    /// the file's usings. A `global::` name binds from the root only, and
    /// usings import types, so they never prefix a dotted name.
    fn lookup(&self, global: bool, path: &[String], table: &SymbolTable) -> Option<TypeId> {
        let name = path.join(".");
        if global {
            return table.lookup(&name);
        }

        let enclosing = &self.decl.namespace;
        let usings: &[Vec<String>] = if path.len() == 1 { &self.file.usings } else { &[] };

        (0..=enclosing.len())
            .rev()
            .map(|depth| &enclosing[..depth])
            .chain(usings.iter().map(Vec::as_slice))
            .find_map(|scope| table.lookup(&qualified_name(scope, &name)))
    }
}
