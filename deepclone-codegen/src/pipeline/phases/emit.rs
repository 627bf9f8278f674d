//! Emit phase - renders one generated unit per clone plan.

use deepclone_ir::GeneratedUnit;
use eyre::Result;
use indexmap::IndexMap;

use crate::{
    memo::Fingerprint,
    pipeline::{CompilationContext, Diagnostic, Phase},
    render::{render_clone_unit, render_marker_attribute},
};

/// Phase that renders the marker attribute and every clone plan.
///
/// Units are collected locally and published only once every plan has been
/// rendered.
pub struct EmitPhase;

impl Phase for EmitPhase {
    fn name(&self) -> &'static str {
        "emit"
    }

    fn description(&self) -> &'static str {
        "Render generated source units"
    }

    fn run(&self, ctx: &mut CompilationContext<'_>) -> Result<()> {
        let marker = ctx.marker;
        let mut units = Vec::with_capacity(ctx.plans.len() + 1);
        // hint -> types emitting under it
        let mut owners: IndexMap<String, Vec<String>> = IndexMap::new();

        let key = Fingerprint::of(&("marker", marker));
        let attribute = ctx.caches.emit.get_or_compute(key, || {
            Ok(GeneratedUnit::new(
                GeneratedUnit::hint_for(&marker.class_name()),
                render_marker_attribute(marker),
            ))
        })?;
        owners
            .entry(attribute.hint.clone())
            .or_default()
            .push(marker.qualified_class_name());
        units.push(attribute);

        for plan in &ctx.plans {
            ctx.checkpoint()?;

            let key = Fingerprint::of(&(plan, marker));
            let unit = ctx.caches.emit.get_or_compute(key, || {
                Ok(GeneratedUnit::new(
                    GeneratedUnit::hint_for(&plan.name),
                    render_clone_unit(plan),
                ))
            })?;
            owners
                .entry(unit.hint.clone())
                .or_default()
                .push(plan.qualified_name());
            units.push(unit);
        }

        for (hint, types) in owners.iter().filter(|(_, types)| types.len() > 1) {
            tracing::warn!(%hint, count = types.len(), "hint identifier collision");
            ctx.diagnostics.push(
                Diagnostic::warning(
                    self.name(),
                    format!(
                        "hint `{}` is used by {} types ({}); their written files overwrite each other",
                        hint,
                        types.len(),
                        types.join(", ")
                    ),
                )
                .at(hint.clone()),
            );
        }

        tracing::debug!(units = units.len(), "emit complete");
        ctx.units = units;
        Ok(())
    }
}
