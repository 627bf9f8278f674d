//! Core utilities and types for the deepclone generator.
//!
//! This crate provides fundamental types and utilities used across
//! the deepclone workspace.

mod file;
mod types;
mod utils;

// File operations
pub use file::{GeneratedFile, WriteResult, write_file};
// Fundamental types
pub use types::{Accessibility, MemberKind, TypeKind, UnknownAccessibility, UnknownTypeKind};
// String utilities
pub use utils::{join_path, qualified_name, split_path};
