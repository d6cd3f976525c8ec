//! Language-specific abstractions.
//!
//! This module provides traits and types for language-specific code generation:
//! - [`LanguageCodegen`] - Main trait for language code generators
//! - [`TypeMapper`] - Trait for mapping IR primitives to language types
//! - [`NamingConvention`] - Language-specific naming rules
//! - [`GenerateResult`] - Result of code generation
//! - [`PreviewResult`] - Result of a dry run
//! - [`PreviewFile`] - Generated file preview

mod naming;
mod traits;

pub use naming::NamingConvention;
pub use traits::{GenerateResult, LanguageCodegen, PreviewFile, PreviewResult, TypeMapper};
