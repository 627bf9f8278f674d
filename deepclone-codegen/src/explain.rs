//! Why a type is, or is not, in the closure.

use std::collections::{HashMap, VecDeque};

use deepclone_ir::{TypeId, TypeSymbol};
use serde::Serialize;
use thiserror::Error;

use crate::PassOutput;

/// One hop of a member chain: `type_name.member` refers to the next type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainStep {
    pub type_name: String,
    pub member: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Reason {
    /// The type carries the marker attribute.
    Marked,
    /// Reached from a marked type. `chain` is a shortest member path,
    /// starting at the marked type.
    Reached { chain: Vec<ChainStep> },
    /// The type cannot receive generated members.
    NotExtensible { is_partial: bool, is_static: bool },
    /// Extensible, but no marked type refers to it.
    Unreachable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explanation {
    pub type_name: String,
    pub in_closure: bool,
    pub reason: Reason,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExplainError {
    #[error("no type named `{0}`")]
    NotFound(String),
    #[error("`{name}` is ambiguous: {}", .candidates.join(", "))]
    Ambiguous {
        name: String,
        candidates: Vec<String>,
    },
}

/// Explain a type by qualified name, or by simple name when unambiguous.
pub fn explain(output: &PassOutput, name: &str) -> Result<Explanation, ExplainError> {
    let symbol = find(output, name)?;
    let in_closure = output.closure.contains(symbol.id);

    let reason = if in_closure && output.closure.is_marked(symbol.id) {
        Reason::Marked
    } else if !symbol.is_extensible() {
        Reason::NotExtensible {
            is_partial: symbol.is_partial,
            is_static: symbol.is_static,
        }
    } else {
        match shortest_chain(output, symbol.id) {
            Some(chain) => Reason::Reached { chain },
            None => Reason::Unreachable,
        }
    };

    Ok(Explanation {
        type_name: symbol.qualified_name(),
        in_closure,
        reason,
    })
}

fn find<'o>(output: &'o PassOutput, name: &str) -> Result<&'o TypeSymbol, ExplainError> {
    if let Some(symbol) = output.symbols.lookup(name).and_then(|id| output.symbols.get(id)) {
        return Ok(symbol);
    }

    let matches = output.symbols.lookup_simple(name);
    match matches.as_slice() {
        [id] => output
            .symbols
            .get(*id)
            .ok_or_else(|| ExplainError::NotFound(name.to_string())),
        [] => Err(ExplainError::NotFound(name.to_string())),
        ids => Err(ExplainError::Ambiguous {
            name: name.to_string(),
            candidates: ids
                .iter()
                .filter_map(|id| output.symbols.get(*id))
                .map(TypeSymbol::qualified_name)
                .collect(),
        }),
    }
}

/// Breadth-first search from every marked closure type along the edges the
/// closure builder follows.
fn shortest_chain(output: &PassOutput, target: TypeId) -> Option<Vec<ChainStep>> {
    let table = &output.symbols;
    let mut parent: HashMap<TypeId, (TypeId, &str)> = HashMap::new();
    let mut queue: VecDeque<TypeId> = output
        .marked
        .iter()
        .copied()
        .filter(|id| output.closure.contains(*id))
        .collect();
    let roots: Vec<TypeId> = queue.iter().copied().collect();

    while let Some(id) = queue.pop_front() {
        if id == target {
            break;
        }
        let Some(symbol) = table.get(id) else {
            continue;
        };
        for member in symbol.members.iter().filter(|m| m.is_clone_candidate()) {
            if let Some(next) = member.ty.named()
                && table.get(next).is_some_and(TypeSymbol::is_extensible)
                && !roots.contains(&next)
                && !parent.contains_key(&next)
            {
                parent.insert(next, (id, member.name.as_str()));
                queue.push_back(next);
            }
        }
    }

    let mut chain = Vec::new();
    let mut current = target;
    while let Some(&(from, member)) = parent.get(&current) {
        chain.push(ChainStep {
            type_name: table.get(from)?.qualified_name(),
            member: member.to_string(),
        });
        current = from;
    }

    if chain.is_empty() {
        return None;
    }
    chain.reverse();
    Some(chain)
}

#[cfg(test)]
mod tests {
    use deepclone_manifest::{SourceFile, SyntaxForest};

    use super::*;
    use crate::{Generator, MarkerConfig};

    fn output() -> PassOutput {
        let file: SourceFile = r#"
            namespace = "Shop"

            [[types]]
            name = "Order"
            modifiers = ["partial"]
            attributes = ["DeepCloneable"]
            [[types.members]]
            name = "Customer"
            type = "Customer"
            [[types.members]]
            name = "Shipping"
            type = "Address"

            [[types]]
            name = "Customer"
            modifiers = ["partial"]
            [[types.members]]
            name = "Home"
            type = "Address"

            [[types]]
            name = "Address"
            modifiers = ["partial"]

            [[types]]
            name = "Money"
            kind = "struct"

            [[types]]
            name = "Orphan"
            modifiers = ["partial"]
        "#
        .parse()
        .unwrap();
        let forest = SyntaxForest::new(vec![file]);
        Generator::new(MarkerConfig::default()).run(&forest).unwrap().clone()
    }

    #[test]
    fn test_marked() {
        let explanation = explain(&output(), "Order").unwrap();
        assert_eq!(explanation.type_name, "Shop.Order");
        assert!(explanation.in_closure);
        assert_eq!(explanation.reason, Reason::Marked);
    }

    #[test]
    fn test_reached_by_shortest_chain() {
        let explanation = explain(&output(), "Shop.Address").unwrap();
        assert!(explanation.in_closure);
        assert_eq!(
            explanation.reason,
            Reason::Reached {
                chain: vec![ChainStep {
                    type_name: "Shop.Order".into(),
                    member: "Shipping".into(),
                }]
            }
        );
    }

    #[test]
    fn test_not_extensible_and_unreachable() {
        let output = output();
        assert_eq!(
            explain(&output, "Money").unwrap().reason,
            Reason::NotExtensible {
                is_partial: false,
                is_static: false
            }
        );
        let orphan = explain(&output, "Orphan").unwrap();
        assert!(!orphan.in_closure);
        assert_eq!(orphan.reason, Reason::Unreachable);
    }

    #[test]
    fn test_unknown_type() {
        assert_eq!(
            explain(&output(), "Nope"),
            Err(ExplainError::NotFound("Nope".into()))
        );
    }
}
