//! Language-agnostic code generation traits.

use std::path::{Path, PathBuf};

use eyre::Result;
use tessera_ir::Primitive;

/// Trait for language-specific code generators.
///
/// Implement this trait to add support for generating API clients in a new language.
pub trait LanguageCodegen {
    /// Language identifier (e.g., "python")
    fn language(&self) -> &'static str;

    /// Render generated files without writing to disk
    fn preview(&self) -> Result<PreviewResult>;

    /// Generate all files into the specified output directory
    fn generate(&self, output_dir: &Path) -> Result<GenerateResult>;
}

/// Result of code generation
#[derive(Debug, Default)]
pub struct GenerateResult {
    /// Files that were written
    pub written: Vec<PathBuf>,
    /// Number of methods emitted across all files
    pub method_count: usize,
    /// Routes left out by the auth filter, as `namespace/route`
    pub filtered_routes: Vec<String>,
}

/// Result of a dry run
#[derive(Debug, Default)]
pub struct PreviewResult {
    /// Files that would be written
    pub files: Vec<PreviewFile>,
    /// Number of methods emitted across all files
    pub method_count: usize,
    /// Routes left out by the auth filter, as `namespace/route`
    pub filtered_routes: Vec<String>,
}

/// A generated file for preview
#[derive(Debug)]
pub struct PreviewFile {
    /// Relative path from output directory
    pub path: String,
    /// File content
    pub content: String,
}

/// Trait for mapping IR primitives to language-specific type names.
///
/// Implement this trait for each target language to provide type mappings.
pub trait TypeMapper {
    /// Map a primitive to the language's type name
    fn map_primitive(&self, primitive: Primitive) -> &'static str;

    /// The name documenting "no value"
    fn void(&self) -> &'static str;
}
