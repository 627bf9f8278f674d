//! Project manifest and declaration file parsing for the deepclone generator.
//!
//! Declaration files stand in for the host compiler's view of a code base:
//! every `[[types]]` entry is one type declaration fragment, and the set of
//! files forms the [`SyntaxForest`] the generator analyzes.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod forest;
mod manifest;
mod source;
mod validate;

pub use error::{Error, Result, SourceContext};
pub use forest::{DeclId, SyntaxForest};
pub use manifest::{
    ATTRIBUTE_SUFFIX, DEFAULT_MARKER, DEFAULT_MARKER_NAMESPACE, GeneratorConfig, Manifest,
    ProjectConfig, ProjectFile, parse_manifest,
};
pub use source::{
    AttributeRef, AttributeRefError, BUILTIN_TYPES, MemberDecl, Modifiers, SourceFile, TypeDecl,
    TypeExpr, TypeExprError,
};
pub use validate::ParseContext;
