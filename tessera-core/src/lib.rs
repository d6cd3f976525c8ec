//! Core utilities and types for the Tessera client generator.
//!
//! This crate provides identifier casing and generated-file plumbing shared
//! across the Tessera crates.

mod file;
mod utils;

// File operations
pub use file::{GeneratedFile, write_file};
// String utilities
pub use utils::{split_words, to_pascal_case, to_snake_case};
