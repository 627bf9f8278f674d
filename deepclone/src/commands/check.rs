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
pub struct CheckCommand {
    /// Path to deepclone.toml (defaults to ./deepclone.toml)
    #[arg(short, long, default_value = "deepclone.toml")]
    pub config: PathBuf,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let project = ProjectFile::open(&self.config).unwrap_or_exit();
        let forest = project.load_forest().unwrap_or_exit();

        let report = ops::check(&project, &forest)?;
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }

        Ok(())
    }
}
