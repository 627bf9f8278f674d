//! Compilation context passed through pipeline phases.

use deepclone_ir::{ClonePlan, ClosureSet, GeneratedUnit};
use deepclone_manifest::SyntaxForest;

use super::{CancellationToken, Cancelled, Diagnostic, TypeCandidate, phases::Resolution};
use crate::{MarkerConfig, memo::StageCaches};

/// Context passed through all pipeline phases.
///
/// Inputs are borrowed for the length of one pass. Every phase publishes its
/// output into the context only once that output is complete.
pub struct CompilationContext<'a> {
    /// The declaration snapshot being analyzed.
    pub forest: &'a SyntaxForest,
    pub marker: &'a MarkerConfig,
    pub(crate) caches: &'a mut StageCaches,
    cancel: CancellationToken,
    /// Marked fragments (populated by ScanPhase).
    pub candidates: Vec<TypeCandidate>,
    /// Symbols and marked ids (populated by ResolvePhase).
    pub resolution: Option<Resolution>,
    /// Types needing a clone method (populated by ClosurePhase).
    pub closure: Option<ClosureSet>,
    /// Per-type plans in closure order (populated by PlanPhase).
    pub plans: Vec<ClonePlan>,
    /// Generated units, marker attribute first (populated by EmitPhase).
    pub units: Vec<GeneratedUnit>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> CompilationContext<'a> {
    pub fn new(
        forest: &'a SyntaxForest,
        marker: &'a MarkerConfig,
        caches: &'a mut StageCaches,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            forest,
            marker,
            caches,
            cancel,
            candidates: Vec::new(),
            resolution: None,
            closure: None,
            plans: Vec::new(),
            units: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Fail with [`Cancelled`] if the pass has been cancelled.
    pub fn checkpoint(&self) -> Result<(), Cancelled> {
        self.cancel.checkpoint()
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }
}

/// Error for a phase output that is missing because its phase did not run.
pub(crate) fn not_run(phase: &str) -> eyre::Report {
    eyre::eyre!("no output from the {} phase - did it run?", phase)
}
