//! Generate command report data structures.

use std::path::PathBuf;

use tessera_codegen::language::PreviewFile;

use super::output::{Output, Report};

/// Report data from client generation.
#[derive(Debug)]
pub struct GenerateReport {
    /// Name of the generated class.
    pub class_name: String,
    /// Namespaces in the API description.
    pub namespace_count: usize,
    /// Methods emitted, counting both variants of download routes.
    pub method_count: usize,
    /// Routes left out by the auth filter, as `namespace/route`.
    pub filtered_routes: Vec<String>,
    /// Generation result (files written or preview).
    pub result: GenerationResult,
}

/// Result of client generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(Vec<PathBuf>),
    /// Dry-run preview.
    Preview(Vec<PreviewFile>),
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            GenerationResult::Written(files) => self.render_written(out, files),
            GenerationResult::Preview(files) => self.render_preview(out, files),
        }
    }
}

impl GenerateReport {
    fn render_written(&self, out: &mut dyn Output, files: &[PathBuf]) {
        out.preformatted(&format!(
            "{}: {} method{} from {} namespace{}",
            self.class_name,
            self.method_count,
            plural(self.method_count),
            self.namespace_count,
            plural(self.namespace_count),
        ));
        out.newline();

        out.section("Generated");
        for file in files {
            out.added_item(&file.display().to_string());
        }

        self.render_filtered(out);
    }

    fn render_preview(&self, out: &mut dyn Output, files: &[PreviewFile]) {
        for file in files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        out.preformatted(&format!(
            "{} file{} would be generated ({} method{})",
            files.len(),
            plural(files.len()),
            self.method_count,
            plural(self.method_count),
        ));
        self.render_filtered(out);
    }

    fn render_filtered(&self, out: &mut dyn Output) {
        if self.filtered_routes.is_empty() {
            return;
        }
        out.newline();
        out.section("Skipped by auth filter");
        for route in &self.filtered_routes {
            out.removed_item(route);
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
