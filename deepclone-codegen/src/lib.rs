//! The deepclone generation pipeline.
//!
//! Turns a [`SyntaxForest`](deepclone_manifest::SyntaxForest) of declaration
//! files into one generated `DeepClone` source unit per type that needs one.
//!
//! # Module Organization
//!
//! - [`builder`] - Code generation building blocks (CodeBuilder, Indent)
//! - [`pipeline`] - Phases, plugins, diagnostics and cancellation
//! - [`memo`] - Content-hash memoization of stage outputs
//! - [`render`] - C# text for clone units and the marker attribute
//! - [`generator`] - The incremental driver that owns caches across passes
//! - [`explain`] - Why a type is or is not in the closure

pub mod builder;
pub mod explain;
pub mod generator;
mod marker;
pub mod memo;
pub mod pipeline;
pub mod render;

pub use explain::{ChainStep, ExplainError, Explanation, Reason, explain};
pub use generator::{Generator, PassOutput};
pub use marker::MarkerConfig;
pub use memo::{Fingerprint, PassStats, StageStats};
pub use pipeline::{CancellationToken, Cancelled, Diagnostic, Severity, is_cancelled};
