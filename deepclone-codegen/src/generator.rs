//! The incremental driver.
//!
//! A [`Generator`] lives across passes. Each pass runs the full pipeline over
//! a fresh forest snapshot, but stage outputs whose inputs are unchanged come
//! straight from the content-hash caches.

use deepclone_ir::{ClonePlan, ClosureSet, GeneratedUnit, SymbolTable, TypeId};
use deepclone_manifest::{GeneratorConfig, SyntaxForest};
use eyre::Result;
use serde::Serialize;

use crate::{
    MarkerConfig,
    memo::{PassStats, StageCaches},
    pipeline::{CancellationToken, CompilationContext, Diagnostic, Pipeline, not_run},
};

/// Everything one successful pass produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassOutput {
    pub symbols: SymbolTable,
    pub marked: Vec<TypeId>,
    pub closure: ClosureSet,
    pub plans: Vec<ClonePlan>,
    /// Marker attribute unit first, then one unit per plan.
    pub units: Vec<GeneratedUnit>,
    pub diagnostics: Vec<Diagnostic>,
    pub stats: PassStats,
}

impl PassOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn unit(&self, hint: &str) -> Option<&GeneratedUnit> {
        self.units.iter().find(|u| u.hint == hint)
    }

    pub fn plan(&self, qualified: &str) -> Option<&ClonePlan> {
        self.plans.iter().find(|p| p.qualified_name() == qualified)
    }
}

/// Incremental generator: owns the stage caches and the last published
/// output.
pub struct Generator {
    marker: MarkerConfig,
    pipeline: Pipeline,
    caches: StageCaches,
    last: Option<PassOutput>,
}

impl Generator {
    pub fn new(marker: MarkerConfig) -> Self {
        Self {
            marker,
            pipeline: Pipeline::new(),
            caches: StageCaches::default(),
            last: None,
        }
    }

    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(MarkerConfig::from(config))
    }

    /// Replace the pipeline, e.g. to attach plugins.
    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn marker(&self) -> &MarkerConfig {
        &self.marker
    }

    /// The output of the last pass that completed.
    pub fn last_output(&self) -> Option<&PassOutput> {
        self.last.as_ref()
    }

    /// Run one pass over a forest snapshot.
    pub fn run(&mut self, forest: &SyntaxForest) -> Result<&PassOutput> {
        self.run_with_cancellation(forest, &CancellationToken::new())
    }

    /// Run one pass, checking `cancel` at every traversal step.
    ///
    /// # Errors
    ///
    /// Fails if a phase fails or the pass is cancelled. Either way nothing
    /// is published: [`last_output`](Self::last_output) still returns the
    /// previous pass.
    #[tracing::instrument(skip_all, fields(files = forest.files().len()))]
    pub fn run_with_cancellation(
        &mut self,
        forest: &SyntaxForest,
        cancel: &CancellationToken,
    ) -> Result<&PassOutput> {
        self.caches.begin_pass();

        let mut ctx = CompilationContext::new(forest, &self.marker, &mut self.caches, cancel.clone());
        if let Err(err) = self.pipeline.run(&mut ctx) {
            tracing::debug!(error = %err, "pass aborted; keeping previous output");
            return Err(err);
        }

        let resolution = ctx.resolution.take().ok_or_else(|| not_run("resolve"))?;
        let closure = ctx.closure.take().ok_or_else(|| not_run("closure"))?;
        let plans = std::mem::take(&mut ctx.plans);
        let units = std::mem::take(&mut ctx.units);
        let diagnostics = std::mem::take(&mut ctx.diagnostics);
        drop(ctx);

        self.caches.evict_unused();
        let stats = self.caches.stats();
        tracing::info!(
            closure = closure.len(),
            units = units.len(),
            diagnostics = diagnostics.len(),
            ?stats,
            "pass complete"
        );

        Ok(&*self.last.insert(PassOutput {
            symbols: resolution.table,
            marked: resolution.marked.into_iter().collect(),
            closure,
            plans,
            units,
            diagnostics,
            stats,
        }))
    }
}

#[cfg(test)]
mod tests {
    use deepclone_manifest::SourceFile;

    use super::*;
    use crate::{
        memo::StageStats,
        pipeline::{Phase, is_cancelled},
    };

    fn forest(content: &str) -> SyntaxForest {
        SyntaxForest::new(vec![content.parse::<SourceFile>().unwrap()])
    }

    const PEOPLE: &str = r#"
        namespace = "Demo"

        [[types]]
        name = "Person"
        modifiers = ["partial"]
        attributes = ["DeepCloneable"]

        [[types.members]]
        name = "Address"
        type = "Address?"

        [[types]]
        name = "Address"
        modifiers = ["partial"]

        [[types.members]]
        name = "Street"
        type = "string"
    "#;

    /// Flags every marked type as an error.
    struct RejectMarked;

    impl Phase for RejectMarked {
        fn name(&self) -> &'static str {
            "reject"
        }

        fn description(&self) -> &'static str {
            "Reject marked types"
        }

        fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()> {
            let rejected: Vec<_> = ctx
                .candidates
                .iter()
                .map(|c| Diagnostic::error(self.name(), "type is rejected").at(c.name.clone()))
                .collect();
            ctx.diagnostics.extend(rejected);
            Ok(())
        }
    }

    #[test]
    fn test_second_pass_hits_every_cache() {
        let forest = forest(PEOPLE);
        let mut generator = Generator::new(MarkerConfig::default());

        let first = generator.run(&forest).unwrap().clone();
        assert_eq!(first.stats.closure.misses, 1);
        assert_eq!(first.stats.plan.misses, 2);

        let second = generator.run(&forest).unwrap();
        assert_eq!(second.units, first.units);
        assert_eq!(second.stats.scan.misses, 0);
        assert_eq!(second.stats.resolve.hits, 1);
        assert_eq!(second.stats.closure.hits, 1);
        assert_eq!(second.stats.plan.hits, 2);
        assert_eq!(second.stats.emit.hits, 3);
    }

    #[test]
    fn test_unrelated_edit_reuses_plans() {
        let mut generator = Generator::new(MarkerConfig::default());
        generator.run(&forest(PEOPLE)).unwrap();

        let edited = format!("{}\n[[types]]\nname = \"Unrelated\"\n", PEOPLE);
        let output = generator.run(&forest(&edited)).unwrap();

        // The symbol table changed, so resolve and closure rerun...
        assert_eq!(output.stats.resolve.misses, 1);
        assert_eq!(output.stats.closure.misses, 1);
        // ...but every plan and unit is unchanged.
        assert_eq!(output.stats.plan.misses, 0);
        assert_eq!(output.stats.emit.misses, 0);
    }

    #[test]
    fn test_edit_ahead_in_name_order_reuses_plans() {
        let mut generator = Generator::new(MarkerConfig::default());
        let first = generator.run(&forest(PEOPLE)).unwrap().clone();

        // `Demo.AAA` sorts first, so every existing type gets a new id.
        let edited = format!("{}\n[[types]]\nname = \"AAA\"\n", PEOPLE);
        let output = generator.run(&forest(&edited)).unwrap();

        assert_ne!(
            output.symbols.lookup("Demo.Person"),
            first.symbols.lookup("Demo.Person")
        );
        assert_eq!(output.stats.plan, StageStats { hits: 2, misses: 0 });
        assert_eq!(output.stats.emit, StageStats { hits: 3, misses: 0 });
        assert_eq!(output.plans, first.plans);
        assert_eq!(output.units, first.units);
        assert!(output.plan("Demo.Person").unwrap().properties[0].recursive);
    }

    #[test]
    fn test_cancelled_pass_keeps_previous_output() {
        let mut generator = Generator::new(MarkerConfig::default());
        let previous = generator.run(&forest(PEOPLE)).unwrap().clone();

        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = generator
            .run_with_cancellation(&forest("[[types]]\nname = \"Other\"\n"), &cancel)
            .unwrap_err();

        assert!(is_cancelled(&err));
        assert_eq!(generator.last_output(), Some(&previous));
    }

    #[test]
    fn test_user_phase_errors_are_published() {
        let mut generator = Generator::new(MarkerConfig::default())
            .with_pipeline(Pipeline::new().phase(RejectMarked));
        let output = generator.run(&forest(PEOPLE)).unwrap();

        assert!(output.has_errors());
        assert_eq!(
            output.diagnostics.last().map(|d| d.to_string()),
            Some("error: type is rejected (at Demo.Person)".to_string())
        );
    }

    #[test]
    fn test_pass_output_lookups() {
        let mut generator = Generator::from_config(&GeneratorConfig::default());
        let output = generator.run(&forest(PEOPLE)).unwrap();

        assert_eq!(output.marked.len(), 1);
        assert!(output.unit("Person.g").is_some());
        assert!(output.unit("Address.g").is_some());
        assert!(output.plan("Demo.Person").unwrap().properties[0].recursive);
        assert!(!output.has_errors());
    }
}
