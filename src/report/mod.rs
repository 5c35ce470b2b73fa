//! Entity frequency and keyword report layer.

pub mod dates;
pub mod frequency;
pub mod keyword;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, instrument, warn};

use crate::{
    config::Settings,
    data::{corpus, metadata::MetadataIndex, store},
    nlp::Mention,
    report::keyword::{ReportOptions, ReportRow},
};

/// Name of the entity frequency output under `OUTPUTS_DIR`.
pub const ENTITIES_CSV: &str = "entities.csv";

/// Persist the mention cache and the entity frequency list.
#[instrument(skip(settings, mentions), fields(mentions = mentions.len()))]
pub async fn write_entities(settings: &Settings, mentions: &[Mention]) -> Result<()> {
    store::write_mentions(mentions, &settings.mentions_path())?;
    let counts = frequency::count_entities(mentions);
    frequency::write_entity_counts(&counts, &settings.join_output(ENTITIES_CSV))?;
    for (entity, count) in frequency::top_entities(&counts, 10) {
        info!(%entity, count, "frequent entity");
    }
    Ok(())
}

/// Build the keyword report from the mention cache.
///
/// Returns `None` when the cache has not been produced yet or holds no
/// mentions.
#[instrument(skip(settings))]
pub async fn keyword_report(
    settings: &Settings,
    options: &ReportOptions,
    output: &Path,
) -> Result<Option<Vec<ReportRow>>> {
    let cache = settings.mentions_path();
    if !cache.exists() {
        warn!(path = %cache.display(), "entity mention cache missing; run entities first");
        return Ok(None);
    }
    let mentions = store::read_mentions(&cache)?;
    if mentions.is_empty() {
        warn!(path = %cache.display(), "no entity mentions; skipping keyword report");
        return Ok(None);
    }
    let metadata = MetadataIndex::load(&settings.metadata_path)?;
    let articles = corpus::index(&settings.corpus_dir)
        .with_context(|| format!("index corpus {:?}", settings.corpus_dir))?;
    let rows = keyword::run_report(&mentions, &metadata, &articles, options, output)?;
    Ok(Some(rows))
}
