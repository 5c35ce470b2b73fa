//! Article corpus discovery and parsing for CORD-19 style JSON records.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Failures while reading a single article file.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("reading article {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing article {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("walking corpus directory {path:?}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// One research article as laid out in the corpus JSON files.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub paper_id: String,
    #[serde(default)]
    pub metadata: ArticleMetadata,
    #[serde(rename = "abstract", default)]
    pub abstract_paragraphs: Vec<Paragraph>,
    #[serde(default)]
    pub body_text: Vec<Paragraph>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleMetadata {
    #[serde(default)]
    pub title: String,
}

/// A paragraph of running text with its section heading.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub section: String,
}

impl Article {
    pub fn has_abstract(&self) -> bool {
        self.abstract_paragraphs
            .iter()
            .any(|p| !p.text.trim().is_empty())
    }

    pub fn has_body(&self) -> bool {
        self.body_text.iter().any(|p| !p.text.trim().is_empty())
    }

    /// Abstract paragraphs followed by body paragraphs, blanks dropped.
    pub fn texts(&self) -> Vec<&str> {
        self.abstract_paragraphs
            .iter()
            .chain(self.body_text.iter())
            .map(|p| p.text.as_str())
            .filter(|t| !t.trim().is_empty())
            .collect()
    }
}

/// Document key derived from the file name: `abc.json` is `abc`,
/// `PMC123.xml.json` is `PMC123`.
pub fn source_id(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let stem = name.strip_suffix(".json")?;
    let stem = stem.strip_suffix(".xml").unwrap_or(stem);
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}

/// Walk `root` and map every article file to its source id.
///
/// Iteration order is sorted by source id. When the same id exists in two
/// sub-trees the first path in walk order is kept.
pub fn index(root: &Path) -> Result<BTreeMap<String, PathBuf>, CorpusError> {
    let mut articles = BTreeMap::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| CorpusError::Walk {
            path: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        let Some(id) = source_id(path) else {
            continue;
        };
        if articles.contains_key(&id) {
            debug!(%id, path = %path.display(), "duplicate source id; keeping first");
            continue;
        }
        articles.insert(id, path.to_path_buf());
    }
    info!(root = %root.display(), articles = articles.len(), "indexed corpus");
    Ok(articles)
}

/// Read and parse one article file.
pub fn load(path: &Path) -> Result<Article, CorpusError> {
    let raw = fs::read_to_string(path).map_err(|source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&raw).map_err(|source| CorpusError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse an article from its JSON text.
pub fn parse(raw: &str) -> Result<Article, serde_json::Error> {
    serde_json::from_str(raw)
}
