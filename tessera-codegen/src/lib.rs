//! Shared code generation utilities for the Tessera client generator.
//!
//! This crate provides language-agnostic abstractions and utilities
//! used by language-specific code generators (e.g., `tessera-codegen-python`).
//!
//! # Module Organization
//!
//! - [`builder`] - Line emission primitives (CodeBuilder, MultilineList, Indent)
//! - [`language`] - Language-specific abstractions (LanguageCodegen, TypeMapper, etc.)

pub mod builder;
pub mod language;
