//! Generate operation - client module from an API description.

use std::path::Path;

use eyre::{Context, Result};
use tessera_codegen::language::LanguageCodegen;
use tessera_codegen_python::{ClientConfig, Generator};
use tessera_ir::Api;
use tracing::info;

use crate::reports::{GenerateReport, GenerationResult};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Output directory for the generated module.
    pub output_dir: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
}

/// Execute the generate operation.
pub fn generate(api: &Api, config: &ClientConfig, opts: GenerateOptions) -> Result<GenerateReport> {
    let generator = Generator::new(api, config);

    let (result, method_count, filtered_routes) = if opts.dry_run {
        let preview = generator.preview().wrap_err("Failed to generate client")?;
        (
            GenerationResult::Preview(preview.files),
            preview.method_count,
            preview.filtered_routes,
        )
    } else {
        let generated = generator
            .generate(opts.output_dir)
            .wrap_err("Failed to generate client")?;
        info!(
            language = generator.language(),
            files = generated.written.len(),
            "client written"
        );
        (
            GenerationResult::Written(generated.written),
            generated.method_count,
            generated.filtered_routes,
        )
    };

    Ok(GenerateReport {
        class_name: config.class_name.clone(),
        namespace_count: api.namespaces.len(),
        method_count,
        filtered_routes,
        result,
    })
}

#[cfg(test)]
mod tests {
    use tessera_manifest::parse_api;

    use super::*;

    const API: &str = r#"
[[namespaces]]
name = "files"

[[namespaces.routes]]
name = "list_folder"
attrs = { auth = "user" }

[[namespaces.routes]]
name = "download"
attrs = { style = "download", auth = "app" }
"#;

    #[test]
    fn test_dry_run_writes_nothing() {
        let api = parse_api(API, "api.toml").unwrap();
        let config = ClientConfig::new("base", "DropboxBase", "dropbox");
        let dir = tempfile::tempdir().unwrap();

        let report = generate(
            &api,
            &config,
            GenerateOptions {
                output_dir: dir.path(),
                dry_run: true,
            },
        )
        .unwrap();

        assert_eq!(report.method_count, 3);
        assert!(report.filtered_routes.is_empty());
        match &report.result {
            GenerationResult::Preview(files) => {
                assert_eq!(files.len(), 1);
                assert_eq!(files[0].path, "base.py");
                assert!(files[0].content.contains("class DropboxBase(object):"));
            }
            GenerationResult::Written(_) => panic!("dry run should not write"),
        }
        assert!(!dir.path().join("base.py").exists());
    }

    #[test]
    fn test_dry_run_reports_filtered_routes() {
        let api = parse_api(API, "api.toml").unwrap();
        let config = ClientConfig::new("base", "DropboxBase", "dropbox").with_auth_type("app");
        let dir = tempfile::tempdir().unwrap();

        let report = generate(
            &api,
            &config,
            GenerateOptions {
                output_dir: dir.path(),
                dry_run: true,
            },
        )
        .unwrap();

        assert_eq!(report.method_count, 2);
        assert_eq!(report.filtered_routes, ["files/list_folder"]);
        match &report.result {
            GenerationResult::Preview(files) => {
                assert!(files[0].content.contains("def files_download(self):"));
                assert!(!files[0].content.contains("files_list_folder"));
            }
            GenerationResult::Written(_) => panic!("dry run should not write"),
        }
    }

    #[test]
    fn test_generate_reports_filtered_routes() {
        let api = parse_api(API, "api.toml").unwrap();
        let config = ClientConfig::new("base", "DropboxBase", "dropbox").with_auth_type("user");
        let dir = tempfile::tempdir().unwrap();

        let report = generate(
            &api,
            &config,
            GenerateOptions {
                output_dir: dir.path(),
                dry_run: false,
            },
        )
        .unwrap();

        assert_eq!(report.method_count, 1);
        assert_eq!(report.filtered_routes, ["files/download"]);
        assert!(dir.path().join("base.py").exists());
    }
}
