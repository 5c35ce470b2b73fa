//! Command-line interface wiring for corpus-miner.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Settings;

pub mod context;
pub mod entities;
pub mod report;
pub mod run;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Biomedical corpus entity mining and keyword reports",
    long_about = None
)]
pub struct Cli {
    /// Default log filter when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Entities(args) => entities::run(args, settings).await,
            Commands::Report(args) => report::run(args, settings).await,
            Commands::Context(args) => context::run(args, settings).await,
            Commands::Run(args) => run::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract entities from every article and write entity counts.
    Entities(entities::Args),
    /// Build the keyword report from cached entity mentions.
    Report(report::Args),
    /// Print the sentences of one article that contain the keyword.
    Context(context::Args),
    /// Run entity extraction followed by the keyword report.
    Run(run::Args),
}
