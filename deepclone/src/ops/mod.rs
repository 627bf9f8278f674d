//! Core operations.
//!
//! This module contains the business logic for deepclone commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod explain;
pub mod generate;

pub use check::check;
pub use explain::explain;
pub use generate::generate;
