//! Pipeline snapshot plugin for visualization and debugging.
//!
//! Captures the pipeline state after each phase so intermediate results can
//! be inspected with `deepclone generate --visualize`.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use deepclone_ir::{ClonePlan, ClosureSet, SymbolTable, TypeId};
use eyre::{Result, eyre};
use serde::Serialize;

use super::{CompilationContext, Diagnostic, Plugin, TypeCandidate};

/// A snapshot of the pipeline state at a specific phase.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseSnapshot {
    /// The phase that just completed.
    pub phase: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<TypeCandidate>,

    /// Resolved symbols (available after "resolve" phase).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbols: Option<SymbolTable>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub marked: Option<Vec<TypeId>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub closure: Option<ClosureSet>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub plans: Vec<ClonePlan>,

    /// Hints of the generated units (available after "emit" phase).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub units: Vec<String>,

    /// Diagnostics collected so far.
    pub diagnostics: Vec<Diagnostic>,
}

impl PhaseSnapshot {
    fn capture(phase: &str, ctx: &CompilationContext<'_>) -> Self {
        Self {
            phase: phase.to_string(),
            candidates: ctx.candidates.clone(),
            symbols: ctx.resolution.as_ref().map(|r| r.table.clone()),
            marked: ctx
                .resolution
                .as_ref()
                .map(|r| r.marked.iter().copied().collect()),
            closure: ctx.closure.clone(),
            plans: ctx.plans.clone(),
            units: ctx.units.iter().map(|u| u.hint.clone()).collect(),
            diagnostics: ctx.diagnostics.clone(),
        }
    }

    fn write(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.json", self.phase));
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json)?;
        Ok(())
    }
}

/// A plugin that captures pipeline state after each phase.
///
/// Clones share the captured snapshots, so a clone can be handed to the
/// pipeline while the caller keeps one to read them back.
///
/// # Example
///
/// ```ignore
/// let snapshots = SnapshotPlugin::new();
/// let pipeline = Pipeline::new().plugin(snapshots.clone());
/// let mut generator = Generator::new(marker).with_pipeline(pipeline);
/// generator.run(&forest)?;
///
/// snapshots.write_to_dir("generated/.deepclone/debug")?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct SnapshotPlugin {
    snapshots: Arc<RwLock<Vec<PhaseSnapshot>>>,
    /// Write each snapshot as soon as it is captured.
    output_dir: Option<PathBuf>,
}

impl SnapshotPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a snapshot plugin that writes to a directory as phases finish.
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshots: Arc::default(),
            output_dir: Some(output_dir.into()),
        }
    }

    /// Get all collected snapshots.
    pub fn snapshots(&self) -> Vec<PhaseSnapshot> {
        match self.snapshots.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Write all snapshots to a directory as `<phase>.json`.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<()> {
        for snapshot in self.snapshots() {
            snapshot.write(dir.as_ref())?;
        }
        Ok(())
    }

    /// Forget snapshots from earlier passes.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.snapshots.write() {
            guard.clear();
        }
    }
}

impl Plugin for SnapshotPlugin {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let snapshot = PhaseSnapshot::capture(phase, ctx);

        if let Some(ref dir) = self.output_dir {
            snapshot.write(dir)?;
        }

        self.snapshots
            .write()
            .map_err(|_| eyre!("snapshot store poisoned"))?
            .push(snapshot);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use deepclone_manifest::{SourceFile, SyntaxForest};
    use tempfile::TempDir;

    use super::*;
    use crate::{Generator, MarkerConfig, pipeline::Pipeline};

    fn forest() -> SyntaxForest {
        let file: SourceFile = r#"
            [[types]]
            name = "Node"
            modifiers = ["partial"]
            attributes = ["DeepCloneable"]

            [[types.members]]
            name = "Next"
            type = "Node?"
        "#
        .parse()
        .unwrap();
        SyntaxForest::new(vec![file])
    }

    #[test]
    fn test_snapshot_plugin_creation() {
        let plugin = SnapshotPlugin::new();
        assert!(plugin.snapshots().is_empty());
    }

    #[test]
    fn test_captures_each_phase() {
        let snapshots = SnapshotPlugin::new();
        let mut generator = Generator::new(MarkerConfig::default())
            .with_pipeline(Pipeline::new().plugin(snapshots.clone()));
        generator.run(&forest()).unwrap();

        let phases: Vec<_> = snapshots.snapshots().into_iter().map(|s| s.phase).collect();
        assert_eq!(phases, vec!["scan", "resolve", "closure", "plan", "emit"]);

        let last = snapshots.snapshots().pop().unwrap();
        assert_eq!(last.units, vec!["DeepCloneableAttribute.g", "Node.g"]);
    }

    #[test]
    fn test_writes_phase_files() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("debug");
        let snapshots = SnapshotPlugin::with_output_dir(&dir);
        let mut generator = Generator::new(MarkerConfig::default())
            .with_pipeline(Pipeline::new().plugin(snapshots));
        generator.run(&forest()).unwrap();

        for phase in ["scan", "resolve", "closure", "plan", "emit"] {
            assert!(dir.join(format!("{}.json", phase)).exists(), "{}", phase);
        }
        let closure = fs::read_to_string(dir.join("closure.json")).unwrap();
        assert!(closure.contains("\"closure\""));
    }
}
