use std::path::PathBuf;

use clap::Args;
use deepclone_manifest::ProjectFile;
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ExplainCommand {
    /// Type to explain, by qualified name or unambiguous simple name
    pub type_name: String,

    /// Path to deepclone.toml (defaults to ./deepclone.toml)
    #[arg(short, long, default_value = "deepclone.toml")]
    pub config: PathBuf,
}

impl ExplainCommand {
    pub fn run(&self) -> Result<()> {
        let project = ProjectFile::open(&self.config).unwrap_or_exit();
        let forest = project.load_forest().unwrap_or_exit();

        let report = ops::explain(&project, &forest, &self.type_name)?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
