//! Resolved symbol and clone-plan types for the deepclone generator.
//!
//! # Architecture
//!
//! ```text
//! declaration files → deepclone-manifest (syntax) → deepclone-ir (symbols, plans) → codegen
//! ```
//!
//! Every type here compares structurally. Two passes over an unchanged
//! forest produce equal values, which is what lets the incremental driver
//! skip downstream work.

mod closure;
mod plan;
mod symbol;
mod unit;

pub use closure::ClosureSet;
pub use plan::{ClonePlan, PropertyPlan};
pub use symbol::{MemberSymbol, SymbolTable, TypeId, TypeRef, TypeSymbol};
pub use unit::{GeneratedUnit, HINT_SUFFIX};
