//! Keyword-filtered document report joined with publication metadata.

use std::{
    cmp::Reverse,
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use indexmap::IndexSet;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    data::{corpus, metadata::MetadataIndex},
    nlp::{
        sentences::{self, CaseMatch},
        Mention,
    },
    report::dates::parse_publish_time,
};

/// Entity variants that select documents for the default report.
pub const DEFAULT_TARGET_ENTITIES: &[&str] = &[
    "Asymptomatic",
    "asymptomatic",
    "asymptomatic carrier phase",
    "Asymptomatic controls",
    "asymptomatic controls",
    "Asymptomatic infection",
    "asymptomatic infection",
    "Asymptomatic infections",
    "asymptomatic infections",
    "asymptomatic line",
    "asymptomatic-to-mild ones",
    "asymptomatic/mild infections",
    "asymptomatically",
    "clinically asymptomatic",
    "delay-adjusted asymptomatic",
    "prodromal/asymptomatic stages",
    "respiratory asymptomatic",
    "SARS-CoV-2 asymptomatic",
];

const SNIPPET_SEPARATOR: &str = " | ";
const REPORT_HEADER: [&str; 4] = ["Date", "Study", "URL", "Snippet"];

/// Parameters for one report run.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub keyword: String,
    pub targets: Vec<String>,
    pub case: CaseMatch,
}

impl ReportOptions {
    /// Options for `keyword` with the default target entities.
    pub fn for_keyword(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            targets: DEFAULT_TARGET_ENTITIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            case: CaseMatch::Sensitive,
        }
    }
}

/// One output row: publication date, title, link and matching sentences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    #[serde(skip)]
    pub source: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Study")]
    pub study: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Snippet")]
    pub snippet: String,
}

/// Sources whose mentions contain any target as a substring, unique, in
/// first-seen order.
pub fn matching_sources<'a>(mentions: &'a [Mention], targets: &[String]) -> Vec<&'a str> {
    let mut sources = IndexSet::new();
    for mention in mentions {
        if targets
            .iter()
            .any(|target| mention.entity.contains(target.as_str()))
        {
            sources.insert(mention.source.as_str());
        }
    }
    sources.into_iter().collect()
}

/// Assemble report rows for `sources`.
///
/// Sources without a metadata row or without a readable article file are
/// left out.
pub fn build_rows(
    sources: &[&str],
    metadata: &MetadataIndex,
    articles: &BTreeMap<String, PathBuf>,
    options: &ReportOptions,
) -> Vec<ReportRow> {
    let mut rows = Vec::new();
    for &source in sources {
        let Some(record) = metadata.lookup(source) else {
            debug!(%source, "no metadata row; skipping");
            continue;
        };
        let Some(path) = articles.get(source) else {
            warn!(%source, "article file not found in corpus");
            continue;
        };
        let article = match corpus::load(path) {
            Ok(article) => article,
            Err(err) => {
                warn!(%source, error = %err, "skipping unreadable article");
                continue;
            }
        };
        let matches =
            sentences::keyword_sentences(article.texts(), &options.keyword, options.case);
        rows.push(ReportRow {
            source: source.to_string(),
            date: record.publish_time.clone(),
            study: record.title.clone(),
            url: record.url.clone(),
            snippet: matches.join(SNIPPET_SEPARATOR),
        });
    }
    rows
}

/// Newest first; rows with missing or unparseable dates go last. Stable.
pub fn sort_newest_first(rows: &mut [ReportRow]) {
    rows.sort_by_cached_key(|row| {
        let date = parse_publish_time(&row.date);
        (date.is_none(), Reverse(date))
    });
}

/// Write rows with the `Date,Study,URL,Snippet` header.
///
/// The header is written even when there are no rows; empty fields stay bare.
pub fn write_report(rows: &[ReportRow], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("create {path:?}"))?;
    writer.write_record(REPORT_HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = rows.len(), "wrote keyword report");
    Ok(())
}

/// End-to-end report: filter cached mentions, join metadata, collect
/// sentences, sort and write to `output`.
pub fn run_report(
    mentions: &[Mention],
    metadata: &MetadataIndex,
    articles: &BTreeMap<String, PathBuf>,
    options: &ReportOptions,
    output: &Path,
) -> Result<Vec<ReportRow>> {
    let sources = matching_sources(mentions, &options.targets);
    info!(
        sources = sources.len(),
        targets = options.targets.len(),
        keyword = %options.keyword,
        "selected documents"
    );
    let mut rows = build_rows(&sources, metadata, articles, options);
    sort_newest_first(&mut rows);
    write_report(&rows, output)?;
    Ok(rows)
}
