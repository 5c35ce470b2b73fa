//! CLI entry-point for entity extraction and frequency counts.

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{config::Settings, nlp, report};

/// Args for the `entities` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Only process the first N articles (sorted by source id).
    #[arg(long)]
    pub limit: Option<usize>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let (mentions, _stats) = nlp::extract_entities(&settings, args.limit).await?;
    report::write_entities(&settings, &mentions).await
}
