//! Publication metadata table and source-id lookup.

use std::{collections::HashMap, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

/// One metadata row. Columns not listed here are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MetadataRecord {
    pub cord_uid: String,
    pub sha: String,
    pub pmcid: String,
    pub title: String,
    pub doi: String,
    pub publish_time: String,
    pub journal: String,
    pub authors: String,
    pub url: String,
}

/// Metadata rows keyed by every sha and pmcid they carry.
#[derive(Debug, Default)]
pub struct MetadataIndex {
    rows: Vec<MetadataRecord>,
    by_source: HashMap<String, usize>,
}

impl MetadataIndex {
    /// Read the metadata CSV at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("open metadata {path:?}"))?;
        let mut rows = Vec::new();
        for result in reader.deserialize() {
            let row: MetadataRecord = result.with_context(|| format!("read metadata {path:?}"))?;
            rows.push(row);
        }
        let index = Self::from_records(rows);
        info!(path = %path.display(), rows = index.len(), keys = index.by_source.len(), "loaded metadata");
        Ok(index)
    }

    /// Build the lookup from rows already in memory; the first row wins a key.
    pub fn from_records(rows: Vec<MetadataRecord>) -> Self {
        let mut by_source = HashMap::new();
        for (idx, row) in rows.iter().enumerate() {
            let keys = row
                .sha
                .split(';')
                .chain(std::iter::once(row.pmcid.as_str()))
                .map(str::trim)
                .filter(|k| !k.is_empty());
            for key in keys {
                if by_source.contains_key(key) {
                    debug!(%key, row = idx, "metadata key already mapped");
                    continue;
                }
                by_source.insert(key.to_string(), idx);
            }
        }
        Self { rows, by_source }
    }

    pub fn lookup(&self, source: &str) -> Option<&MetadataRecord> {
        self.by_source.get(source).map(|&idx| &self.rows[idx])
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
