//! Scan phase - flags declaration fragments that opt into generation.

use deepclone_core::qualified_name;
use deepclone_manifest::{DeclId, TypeDecl};
use eyre::Result;
use serde::Serialize;

use crate::{
    MarkerConfig,
    memo::Fingerprint,
    pipeline::{CompilationContext, Diagnostic, Phase},
};

/// A declaration fragment that passed the syntactic admission filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeCandidate {
    #[serde(skip)]
    pub decl: DeclId,
    /// Qualified name the resolver binds the fragment under.
    pub name: String,
    /// Declaration file the fragment came from.
    pub file: String,
}

/// The admission predicate: the fragment is `partial`, not `static`, and
/// carries the marker attribute.
///
/// Purely syntactic, so it can be cached per fragment.
pub fn is_candidate(decl: &TypeDecl, marker: &MarkerConfig) -> bool {
    decl.modifiers.is_partial
        && !decl.modifiers.is_static
        && decl.attributes.iter().any(|attr| marker.matches(attr))
}

/// Phase that runs the admission filter over every declaration fragment.
pub struct ScanPhase;

impl Phase for ScanPhase {
    fn name(&self) -> &'static str {
        "scan"
    }

    fn description(&self) -> &'static str {
        "Flag declarations carrying the marker attribute"
    }

    fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let forest = ctx.forest;
        let marker = ctx.marker;
        let mut candidates = Vec::new();
        let mut notes = Vec::new();

        for (id, file, decl) in forest.declarations() {
            ctx.checkpoint()?;

            let key = Fingerprint::of(&(decl, marker));
            if ctx.caches.scan.get_or_compute(key, || Ok(is_candidate(decl, marker)))? {
                candidates.push(TypeCandidate {
                    decl: id,
                    name: qualified_name(&decl.namespace, &decl.name),
                    file: file.path.clone(),
                });
                continue;
            }

            if let Some(attr) = decl
                .attributes
                .iter()
                .find(|a| marker.matches_name(a) && !marker.matches(a))
            {
                notes.push(
                    Diagnostic::info(
                        self.name(),
                        format!(
                            "`{}` is not the marker: it is not declared in `{}`",
                            attr,
                            marker.namespace_string()
                        ),
                    )
                    .at(qualified_name(&decl.namespace, &decl.name)),
                );
            }
        }

        tracing::debug!(candidates = candidates.len(), "scan complete");
        ctx.candidates = candidates;
        ctx.diagnostics.extend(notes);
        Ok(())
    }
}
