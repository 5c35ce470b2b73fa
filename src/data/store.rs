//! Parquet cache for extracted entity mentions.

use std::{fs::File, path::Path};

use anyhow::{Context, Result};
use polars::prelude::{DataFrame, NamedFrom, ParquetReader, ParquetWriter, SerReader, Series};
use tracing::info;

use crate::nlp::Mention;

/// Persist mentions as `entity, label, source` columns.
pub fn write_mentions(mentions: &[Mention], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let entities: Vec<String> = mentions.iter().map(|m| m.entity.clone()).collect();
    let labels: Vec<String> = mentions.iter().map(|m| m.label.clone()).collect();
    let sources: Vec<String> = mentions.iter().map(|m| m.source.clone()).collect();
    let mut df = DataFrame::new(vec![
        Series::new("entity".into(), entities),
        Series::new("label".into(), labels),
        Series::new("source".into(), sources),
    ])?;
    let file = File::create(path).with_context(|| format!("create {path:?}"))?;
    ParquetWriter::new(file).finish(&mut df)?;
    info!(path = %path.display(), rows = mentions.len(), "wrote entity mentions parquet");
    Ok(())
}

/// Load mentions previously written by [`write_mentions`], preserving row order.
pub fn read_mentions(path: &Path) -> Result<Vec<Mention>> {
    let file = File::open(path).with_context(|| format!("open {path:?}"))?;
    let df = ParquetReader::new(file).finish()?;
    let entity_col = df.column("entity")?.str()?;
    let label_col = df.column("label")?.str()?;
    let source_col = df.column("source")?.str()?;
    let mut mentions = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        if let (Some(entity), Some(label), Some(source)) = (
            entity_col.get(idx),
            label_col.get(idx),
            source_col.get(idx),
        ) {
            mentions.push(Mention {
                entity: entity.to_string(),
                label: label.to_string(),
                source: source.to_string(),
            });
        }
    }
    info!(path = %path.display(), rows = mentions.len(), "loaded entity mentions");
    Ok(mentions)
}
