//! CLI entry-point printing keyword sentences for a single article.

use anyhow::{anyhow, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{
    config::Settings,
    data::corpus,
    nlp::sentences::{self, CaseMatch},
};

/// Args for the `context` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Source id of the article (file name without `.json`).
    #[arg(long)]
    pub source: String,
    /// Keyword to look for (defaults to KEYWORD).
    #[arg(long)]
    pub keyword: Option<String>,
    /// Match the keyword regardless of case.
    #[arg(long)]
    pub ignore_case: bool,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let keyword = args.keyword.unwrap_or_else(|| settings.keyword.clone());
    let articles = corpus::index(&settings.corpus_dir)?;
    let path = articles
        .get(&args.source)
        .ok_or_else(|| anyhow!("no article with source id {}", args.source))?;
    let article = corpus::load(path)?;
    let matches = sentences::keyword_sentences(
        article.texts(),
        &keyword,
        CaseMatch::from_ignore_case(args.ignore_case),
    );
    info!(source = %args.source, %keyword, sentences = matches.len(), "keyword context");
    for sentence in matches {
        println!("{sentence}");
    }
    Ok(())
}
