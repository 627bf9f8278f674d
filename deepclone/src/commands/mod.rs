mod check;
mod completions;
mod explain;
mod generate;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use explain::ExplainCommand;
use generate::GenerateCommand;

use crate::logging::LogLevel;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for deepclone_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "deepclone")]
#[command(version)]
#[command(about = "Generate DeepClone methods for partial C# types")]
pub(crate) struct Cli {
    /// Log verbosity (overridden by DEEPCLONE_LOG)
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Explain(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate clone units from deepclone.toml
    Generate(GenerateCommand),

    /// Analyze declarations without writing anything
    Check(CheckCommand),

    /// Explain why a type does or does not get a clone method
    Explain(ExplainCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
