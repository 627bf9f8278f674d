//! Pipeline phase trait.

use eyre::Result;

use super::CompilationContext;

/// A phase in the generation pipeline.
///
/// Phases are executed in order by the pipeline. Each phase reads the
/// outputs of the phases before it from the context and publishes its own.
///
/// Built-in phases:
/// - `ScanPhase` - flags marked declaration fragments
/// - `ResolvePhase` - merges fragments into symbols and binds member types
/// - `ClosurePhase` - computes the set of types that need a clone method
/// - `PlanPhase` - classifies every member of every closure type
/// - `EmitPhase` - renders one source unit per plan
///
/// Custom phases run after the built-in ones.
pub trait Phase: Send + Sync {
    /// The name of this phase (used in diagnostics and plugin hooks).
    fn name(&self) -> &'static str;

    /// A human-readable description of what this phase does.
    fn description(&self) -> &'static str;

    /// Run this phase on the compilation context.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase fails fatally or the pass was
    /// cancelled. Non-fatal issues are recorded as diagnostics instead.
    fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()>;
}
