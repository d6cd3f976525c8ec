use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use tessera_manifest::ApiFile;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to the API description
    pub api: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let api_file = ApiFile::open(&self.api).unwrap_or_exit();
        let report = ops::check(&api_file)?;

        if self.json {
            let json = serde_json::to_string_pretty(&report).wrap_err("Failed to serialize report")?;
            println!("{}", json);
        } else {
            report.render(&mut TerminalOutput::new());
        }
        Ok(())
    }
}
