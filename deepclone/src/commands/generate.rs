use std::path::PathBuf;

use clap::Args;
use deepclone_manifest::ProjectFile;
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    ops::{self, generate::GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to deepclone.toml (defaults to ./deepclone.toml)
    #[arg(short, long, default_value = "deepclone.toml")]
    pub config: PathBuf,

    /// Output directory (overrides the manifest's generator.output)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Write per-phase pipeline snapshots to <output>/.deepclone/debug
    #[arg(long)]
    pub visualize: bool,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let project = ProjectFile::open(&self.config).unwrap_or_exit();
        let forest = project.load_forest().unwrap_or_exit();
        let output_dir = self.output.clone().unwrap_or_else(|| project.output_dir());

        let report = ops::generate(
            &project,
            &forest,
            GenerateOptions {
                output_dir: &output_dir,
                dry_run: self.dry_run,
                visualize: self.visualize,
            },
        )?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
