//! Generation pipeline.
//!
//! This module provides a [`Pipeline`] orchestrator that runs the generation
//! phases over one snapshot of the declaration forest:
//!
//! - Explicit phase boundaries (scan → resolve → closure → plan → emit)
//! - Plugin hooks for extensibility (before/after each phase)
//! - Unified diagnostics collection
//! - Cooperative cancellation checked at every traversal step
//!
//! # Example
//!
//! ```ignore
//! use deepclone_codegen::pipeline::{CompilationContext, Pipeline};
//!
//! let mut ctx = CompilationContext::new(&forest, &marker, &mut caches, cancel);
//! Pipeline::new().run(&mut ctx)?;
//!
//! for diag in &ctx.diagnostics {
//!     eprintln!("{}", diag);
//! }
//! ```

mod cancel;
mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;
mod snapshot;

pub use cancel::{CancellationToken, Cancelled, is_cancelled};
pub use context::CompilationContext;
pub(crate) use context::not_run;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::Phase;
pub use phases::{DroppedCandidate, Resolution, TypeCandidate};
pub use plugin::Plugin;
pub use runner::Pipeline;
pub use snapshot::{PhaseSnapshot, SnapshotPlugin};
