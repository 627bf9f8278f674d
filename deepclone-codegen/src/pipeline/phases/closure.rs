//! Closure phase - computes every type that needs a generated clone method.

use std::collections::BTreeSet;

use deepclone_ir::{ClosureSet, SymbolTable, TypeId};
use eyre::Result;

use crate::{
    memo::Fingerprint,
    pipeline::{CancellationToken, CompilationContext, Phase, not_run},
};

/// Phase that grows the marked set into the closure.
///
/// Reruns whenever any symbol changes, since a new member anywhere can make
/// another type reachable.
pub struct ClosurePhase;

impl Phase for ClosurePhase {
    fn name(&self) -> &'static str {
        "closure"
    }

    fn description(&self) -> &'static str {
        "Collect marked types and the extensible types they reference"
    }

    fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let cancel = ctx.cancellation().clone();
        let resolution = ctx.resolution.as_ref().ok_or_else(|| not_run("resolve"))?;

        let key = Fingerprint::of(&(&resolution.marked, &resolution.table));
        let closure = ctx.caches.closure.get_or_compute(key, || {
            build_closure(&resolution.table, &resolution.marked, &cancel)
        })?;

        tracing::debug!(
            marked = resolution.marked.len(),
            closure = closure.len(),
            "closure complete"
        );
        ctx.closure = Some(closure);
        Ok(())
    }
}

/// Depth-first traversal from the marked types.
///
/// Uses an explicit stack so deep member chains cannot overflow the call
/// stack. The set doubles as the visited set, which makes self- and
/// mutually-referencing types terminate. Only clone-candidate members are
/// followed, and collections are never traversed.
pub fn build_closure(
    table: &SymbolTable,
    marked: &BTreeSet<TypeId>,
    cancel: &CancellationToken,
) -> Result<ClosureSet> {
    let mut closure = ClosureSet::new();
    let mut stack: Vec<TypeId> = Vec::new();

    for &root in marked {
        stack.push(root);
        while let Some(id) = stack.pop() {
            cancel.checkpoint()?;

            let Some(symbol) = table.get(id) else {
                continue;
            };
            if !symbol.is_extensible() || !closure.insert(id) {
                continue;
            }
            tracing::trace!(type_name = %symbol.qualified_name(), "visited");

            // Reverse so members are visited in declaration order.
            for member in symbol.members.iter().rev() {
                if member.is_clone_candidate()
                    && let Some(target) = member.ty.named()
                    && !closure.contains(target)
                {
                    stack.push(target);
                }
            }
        }
    }

    for &id in marked {
        closure.mark(id);
    }

    Ok(closure)
}

#[cfg(test)]
mod tests {
    use deepclone_core::{Accessibility, MemberKind, TypeKind};
    use deepclone_ir::{MemberSymbol, TypeRef, TypeSymbol};

    use super::*;

    fn member(name: &str, ty: TypeRef) -> MemberSymbol {
        MemberSymbol {
            name: name.into(),
            declared_type: name.into(),
            ty,
            nullable: true,
            kind: MemberKind::Property,
            is_static: false,
            readable: true,
            writable: true,
        }
    }

    fn named(id: u32) -> TypeRef {
        TypeRef::Named { id: TypeId(id) }
    }

    fn symbol(name: &str, partial: bool, members: Vec<MemberSymbol>) -> TypeSymbol {
        TypeSymbol {
            id: TypeId(0),
            namespace: vec![],
            name: name.into(),
            kind: TypeKind::Class,
            accessibility: Accessibility::Public,
            is_partial: partial,
            is_static: false,
            fragments: 1,
            members,
        }
    }

    fn table(symbols: Vec<TypeSymbol>) -> SymbolTable {
        let mut table = SymbolTable::new();
        for symbol in symbols {
            table.insert(symbol);
        }
        table
    }

    fn closure_of(table: &SymbolTable, marked: &[u32]) -> ClosureSet {
        let marked = marked.iter().map(|&id| TypeId(id)).collect();
        build_closure(table, &marked, &CancellationToken::new()).unwrap()
    }

    #[test]
    fn test_reaches_unmarked_extensible_types() {
        let table = table(vec![
            symbol("A", true, vec![member("B", named(1))]),
            symbol("B", true, vec![member("C", named(2))]),
            symbol("C", true, vec![]),
            symbol("D", true, vec![]),
        ]);
        let closure = closure_of(&table, &[0]);

        assert_eq!(closure.iter().collect::<Vec<_>>(), vec![TypeId(0), TypeId(1), TypeId(2)]);
        assert!(closure.is_marked(TypeId(0)));
        assert_eq!(closure.reached().collect::<Vec<_>>(), vec![TypeId(1), TypeId(2)]);
    }

    #[test]
    fn test_self_and_mutual_cycles_terminate() {
        let table = table(vec![
            symbol("A", true, vec![member("Me", named(0)), member("B", named(1))]),
            symbol("B", true, vec![member("A", named(0))]),
        ]);
        let closure = closure_of(&table, &[0, 1]);

        assert_eq!(closure.len(), 2);
        assert!(closure.is_marked(TypeId(1)));
    }

    #[test]
    fn test_non_extensible_types_are_excluded() {
        let table = table(vec![
            symbol("A", true, vec![member("Closed", named(1))]),
            symbol("Closed", false, vec![member("Behind", named(2))]),
            symbol("Behind", true, vec![]),
        ]);
        let closure = closure_of(&table, &[0]);

        assert_eq!(closure.iter().collect::<Vec<_>>(), vec![TypeId(0)]);
    }

    #[test]
    fn test_marked_but_closed_type_is_excluded() {
        let table = table(vec![symbol("A", false, vec![])]);
        let closure = closure_of(&table, &[0]);

        assert!(closure.is_empty());
        assert!(!closure.is_marked(TypeId(0)));
    }

    #[test]
    fn test_only_clone_candidates_are_followed() {
        let mut getter_only = member("ReadOnly", named(1));
        getter_only.writable = false;
        let mut method = member("Make", named(2));
        method.kind = MemberKind::Method;
        let list = member(
            "Items",
            TypeRef::Collection {
                elements: vec![named(3)],
            },
        );

        let table = table(vec![
            symbol("A", true, vec![getter_only, method, list]),
            symbol("B", true, vec![]),
            symbol("C", true, vec![]),
            symbol("D", true, vec![]),
        ]);
        let closure = closure_of(&table, &[0]);

        assert_eq!(closure.len(), 1);
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let depth = 20_000u32;
        let symbols = (0..depth)
            .map(|i| {
                let next = if i + 1 < depth { vec![member("Next", named(i + 1))] } else { vec![] };
                symbol(&format!("T{:05}", i), true, next)
            })
            .collect();
        let closure = closure_of(&table(symbols), &[0]);

        assert_eq!(closure.len(), depth as usize);
    }

    #[test]
    fn test_cancellation_stops_traversal() {
        let table = table(vec![symbol("A", true, vec![])]);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let marked = [TypeId(0)].into_iter().collect();
        let err = build_closure(&table, &marked, &cancel).unwrap_err();
        assert!(crate::pipeline::is_cancelled(&err));
    }
}
