//! Entity frequency tallies.

use std::{cmp::Reverse, collections::BTreeMap, path::Path};

use anyhow::{Context, Result};
use tracing::info;

use crate::nlp::Mention;

/// Exact-text occurrence counts, ordered by entity text.
pub fn count_entities(mentions: &[Mention]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for mention in mentions {
        *counts.entry(mention.entity.clone()).or_insert(0) += 1;
    }
    counts
}

/// The `n` most frequent entities; ties break on entity text.
pub fn top_entities(counts: &BTreeMap<String, usize>, n: usize) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = counts.iter().map(|(k, v)| (k.clone(), *v)).collect();
    ranked.sort_by_key(|(entity, count)| (Reverse(*count), entity.clone()));
    ranked.truncate(n);
    ranked
}

/// Write header-less `entity,count` rows in entity order.
pub fn write_entity_counts(counts: &BTreeMap<String, usize>, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("create {path:?}"))?;
    for (entity, count) in counts {
        writer.write_record([entity.clone(), count.to_string()])?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = counts.len(), "wrote entity counts");
    Ok(())
}
