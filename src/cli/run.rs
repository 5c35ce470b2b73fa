//! CLI entry-point running the whole pipeline.

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{
    config::Settings,
    nlp,
    report::{self, keyword::ReportOptions},
};

/// Args for the `run` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Only process the first N articles (sorted by source id).
    #[arg(long)]
    pub limit: Option<usize>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let (mentions, stats) = nlp::extract_entities(&settings, args.limit).await?;
    report::write_entities(&settings, &mentions).await?;

    let options = ReportOptions::for_keyword(settings.keyword.clone());
    let output = settings.join_output(format!("{}.csv", options.keyword));
    if let Some(rows) = report::keyword_report(&settings, &options, &output).await? {
        info!(
            articles = stats.articles,
            rows = rows.len(),
            path = %output.display(),
            "pipeline finished"
        );
    }
    Ok(())
}
