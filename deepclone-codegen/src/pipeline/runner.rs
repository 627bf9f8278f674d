//! Pipeline orchestrator.

use eyre::Result;

use super::{
    CompilationContext, Phase, Plugin,
    phases::{ClosurePhase, EmitPhase, PlanPhase, ResolvePhase, ScanPhase},
};

/// The generation pipeline orchestrator.
///
/// Runs the built-in phases (scan, resolve, closure, plan, emit) followed by
/// any user phases, calling plugin hooks before and after each phase.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new()
///     .plugin(SnapshotPlugin::new())
///     .phase(MyCustomPhase);
///
/// pipeline.run(&mut ctx)?;
/// ```
pub struct Pipeline {
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    /// Create a new pipeline with default built-in phases.
    pub fn new() -> Self {
        Self {
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Run every phase over the context.
    ///
    /// # Errors
    ///
    /// Returns an error if any phase or plugin fails, or if the pass is
    /// cancelled. Phases publish their output only when complete, so an
    /// aborted pass never leaves a partially built unit in the context.
    pub fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let builtin_phases: [&dyn Phase; 5] =
            [&ScanPhase, &ResolvePhase, &ClosurePhase, &PlanPhase, &EmitPhase];

        for phase in builtin_phases
            .into_iter()
            .chain(self.phases.iter().map(|p| p.as_ref()))
        {
            self.run_phase(phase, ctx)?;
        }

        Ok(())
    }

    fn run_phase(&self, phase: &dyn Phase, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let phase_name = phase.name();

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        ctx.checkpoint()?;
        tracing::debug!(phase = phase_name, "running phase");
        phase.run(ctx)?;

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
