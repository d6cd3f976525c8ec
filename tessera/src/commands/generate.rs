use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use tessera_codegen_python::ClientConfig;
use tessera_manifest::ApiFile;

use super::UnwrapOrExit;
use crate::{
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to the API description
    pub api: PathBuf,

    /// Name of the generated Python module, without `.py`
    #[arg(short, long)]
    pub module_name: String,

    /// Name of the generated client class
    #[arg(short, long)]
    pub class_name: String,

    /// Package the generated client imports namespace types from
    #[arg(short, long)]
    pub types_package: String,

    /// Dotted path of the exception raised for route errors
    #[arg(short, long, default_value = ClientConfig::DEFAULT_ERROR_CLASS_PATH)]
    pub error_class_path: String,

    /// Only generate routes supporting one of these comma-separated auth types
    #[arg(short = 'w', long)]
    pub auth_type: Option<String>,

    /// Output directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let api_file = ApiFile::open(&self.api).unwrap_or_exit();
        let config = self.client_config();

        let report = ops::generate(
            api_file.api(),
            &config,
            GenerateOptions {
                output_dir: &self.output,
                dry_run: self.dry_run,
            },
        )?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }

    fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(&self.module_name, &self.class_name, &self.types_package)
            .with_error_class_path(&self.error_class_path);
        if let Some(auth_type) = &self.auth_type {
            config = config.with_auth_type(auth_type);
        }
        config
    }
}
