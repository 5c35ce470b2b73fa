//! Runtime configuration utilities for corpus-miner.

use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;

/// Keyword the report filters on when nothing else is configured.
pub const DEFAULT_KEYWORD: &str = "asymptomatic";

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Root of the JSON article tree.
    pub corpus_dir: PathBuf,
    /// Metadata table joined against article source ids.
    pub metadata_path: PathBuf,
    /// Root folder for cached data artefacts.
    pub data_dir: PathBuf,
    /// Root folder for analytic outputs.
    pub outputs_dir: PathBuf,
    /// Keyword used by `report` and `context` unless overridden.
    pub keyword: String,
    /// Optional tab-separated `term<TAB>label` lexicon merged into the NER dictionary.
    pub lexicon_path: Option<PathBuf>,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let corpus_dir = env::var("CORPUS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data/corpus"));
        let metadata_path = env::var("METADATA_CSV")
            .map(PathBuf::from)
            .unwrap_or_else(|_| corpus_dir.join("metadata.csv"));
        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));
        let outputs_dir = env::var("OUTPUTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./outputs"));
        let keyword = env::var("KEYWORD")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_KEYWORD.to_string());
        let lexicon_path = env::var("ENTITY_LEXICON").ok().map(PathBuf::from);

        std::fs::create_dir_all(&data_dir).context("creating data dir")?;
        std::fs::create_dir_all(&outputs_dir).context("creating outputs dir")?;

        Ok(Self {
            corpus_dir,
            metadata_path,
            data_dir,
            outputs_dir,
            keyword,
            lexicon_path,
        })
    }

    /// Convenience helper for derived path segments.
    pub fn join_data<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.data_dir.join(path)
    }

    /// Convenience helper for derived output path segments.
    pub fn join_output<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.outputs_dir.join(path)
    }

    /// Location of the cached entity mention table.
    pub fn mentions_path(&self) -> PathBuf {
        self.join_data("clean/entity_mentions.parquet")
    }
}
