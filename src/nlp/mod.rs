//! Natural language processing orchestration layer.

pub mod ner;
pub mod sentences;

use anyhow::{Context, Result};
use tracing::{debug, info, instrument, warn};

use crate::{
    config::Settings,
    data::corpus::{self, Article},
    nlp::ner::Ner,
};

const PROGRESS_EVERY: usize = 500;

/// One recognised entity occurrence and the document it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mention {
    pub entity: String,
    pub label: String,
    pub source: String,
}

/// Counters reported at the end of an extraction pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    pub articles: usize,
    pub skipped: usize,
    pub missing_abstract: usize,
    pub missing_body: usize,
    pub mentions: usize,
}

/// Run NER over every paragraph of one article.
pub fn article_mentions(ner: &dyn Ner, source: &str, article: &Article) -> Vec<Mention> {
    article
        .texts()
        .into_iter()
        .flat_map(|text| ner.extract(text))
        .map(|span| Mention {
            entity: span.text,
            label: span.label,
            source: source.to_string(),
        })
        .collect()
}

/// Extract entity mentions from the configured corpus.
///
/// `limit` caps the number of articles visited, in source-id order.
/// Unreadable articles are skipped and counted rather than aborting the run.
#[instrument(skip(settings))]
pub async fn extract_entities(
    settings: &Settings,
    limit: Option<usize>,
) -> Result<(Vec<Mention>, ExtractionStats)> {
    let ner = ner::load_model(settings)?;
    let index = corpus::index(&settings.corpus_dir)
        .with_context(|| format!("index corpus {:?}", settings.corpus_dir))?;
    let total = limit.map_or(index.len(), |l| l.min(index.len()));
    info!(total, "starting entity extraction");

    let mut stats = ExtractionStats::default();
    let mut mentions = Vec::new();
    for (source, path) in index.iter().take(total) {
        let article = match corpus::load(path) {
            Ok(article) => article,
            Err(err) => {
                warn!(%source, error = %err, "skipping unreadable article");
                stats.skipped += 1;
                continue;
            }
        };
        if !article.has_abstract() {
            info!(%source, "no abstract");
            stats.missing_abstract += 1;
        }
        if !article.has_body() {
            debug!(%source, "no body text");
            stats.missing_body += 1;
        }
        let found = article_mentions(ner.as_ref(), source, &article);
        if found.is_empty() {
            debug!(%source, "no entities found");
        }
        mentions.extend(found);
        stats.articles += 1;
        if stats.articles % PROGRESS_EVERY == 0 {
            info!(done = stats.articles, total, mentions = mentions.len(), "extraction progress");
        }
    }

    stats.mentions = mentions.len();
    info!(
        articles = stats.articles,
        skipped = stats.skipped,
        missing_abstract = stats.missing_abstract,
        missing_body = stats.missing_body,
        mentions = stats.mentions,
        "entity extraction finished"
    );
    Ok((mentions, stats))
}
