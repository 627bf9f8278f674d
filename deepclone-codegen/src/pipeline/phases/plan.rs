//! Plan phase - classifies every member of every closure type.

use deepclone_core::TypeKind;
use deepclone_ir::{ClonePlan, ClosureSet, MemberSymbol, PropertyPlan, SymbolTable, TypeSymbol};
use eyre::Result;

use crate::{
    memo::Fingerprint,
    pipeline::{CompilationContext, Phase, not_run},
};

/// Phase that builds one clone plan per closure type.
pub struct PlanPhase;

impl Phase for PlanPhase {
    fn name(&self) -> &'static str {
        "plan"
    }

    fn description(&self) -> &'static str {
        "Classify members as copy-by-value or recursive clone"
    }

    fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let resolution = ctx.resolution.as_ref().ok_or_else(|| not_run("resolve"))?;
        let closure = ctx.closure.as_ref().ok_or_else(|| not_run("closure"))?;
        let table = &resolution.table;
        let mut plans = Vec::with_capacity(closure.len());

        for id in closure.iter() {
            ctx.checkpoint()?;
            let Some(symbol) = table.get(id) else {
                continue;
            };

            let facts = member_facts(symbol, table, closure);
            let key = plan_key(symbol, &facts);
            let plan = ctx
                .caches
                .plan
                .get_or_compute(key, || Ok(plan_from_facts(symbol, &facts)))?;
            plans.push(plan);
        }

        tracing::debug!(plans = plans.len(), "plan complete");
        ctx.plans = plans;
        Ok(())
    }
}

/// Closure-dependent facts about one clone-candidate member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct MemberFacts {
    recursive: bool,
    targets_struct: bool,
    element_recursive: bool,
}

fn member_facts(symbol: &TypeSymbol, table: &SymbolTable, closure: &ClosureSet) -> Vec<MemberFacts> {
    symbol
        .members
        .iter()
        .filter(|m| m.is_clone_candidate())
        .map(|m| {
            let target = m.ty.named().and_then(|id| table.get(id));
            MemberFacts {
                recursive: target.is_some_and(|t| closure.contains(t.id) && t.is_extensible()),
                targets_struct: target.is_some_and(|t| t.kind == TypeKind::Struct),
                element_recursive: m.ty.element_ids().into_iter().any(|id| closure.contains(id)),
            }
        })
        .collect()
}

/// Fingerprint of everything a plan reads.
///
/// Arena ids are left out: they shift whenever a type is added or removed
/// ahead of this one in name order, without changing the plan.
fn plan_key(symbol: &TypeSymbol, facts: &[MemberFacts]) -> Fingerprint {
    let members: Vec<(&str, bool)> = symbol
        .members
        .iter()
        .filter(|m| m.is_clone_candidate())
        .map(|m| (m.name.as_str(), m.nullable))
        .collect();
    Fingerprint::of(&(
        &symbol.namespace,
        &symbol.name,
        symbol.kind,
        symbol.accessibility,
        members,
        facts,
    ))
}

fn plan_from_facts(symbol: &TypeSymbol, facts: &[MemberFacts]) -> ClonePlan {
    let candidates = symbol.members.iter().filter(|m| m.is_clone_candidate());
    ClonePlan {
        namespace: symbol.namespace.clone(),
        name: symbol.name.clone(),
        kind: symbol.kind,
        accessibility: symbol.accessibility,
        properties: candidates
            .zip(facts)
            .map(|(member, facts)| property_plan(member, facts))
            .collect(),
    }
}

fn property_plan(member: &MemberSymbol, facts: &MemberFacts) -> PropertyPlan {
    PropertyPlan {
        name: member.name.clone(),
        recursive: facts.recursive,
        null_guard: member.nullable || !facts.targets_struct,
        element_recursive: facts.element_recursive,
    }
}

/// Build the clone plan of one closure type.
///
/// Members keep declaration order. A member is recursive exactly when its
/// declared type is an extensible type in the closure.
pub fn build_plan(symbol: &TypeSymbol, table: &SymbolTable, closure: &ClosureSet) -> ClonePlan {
    plan_from_facts(symbol, &member_facts(symbol, table, closure))
}
