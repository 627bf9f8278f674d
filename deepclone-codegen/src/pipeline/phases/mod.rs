//! Built-in pipeline phases.
//!
//! - [`ScanPhase`] - flags marked declaration fragments
//! - [`ResolvePhase`] - merges fragments into symbols, binds member types
//! - [`ClosurePhase`] - computes the set of types needing a clone method
//! - [`PlanPhase`] - builds per-type clone plans
//! - [`EmitPhase`] - renders generated units

mod closure;
mod emit;
mod plan;
mod resolve;
mod scan;

pub use closure::{ClosurePhase, build_closure};
pub use emit::EmitPhase;
pub use plan::{PlanPhase, build_plan};
pub use resolve::{DroppedCandidate, Resolution, ResolvePhase, resolve};
pub use scan::{ScanPhase, TypeCandidate, is_candidate};
