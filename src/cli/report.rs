//! CLI entry-point for the keyword report.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{
    config::Settings,
    nlp::sentences::CaseMatch,
    report::{self, keyword::ReportOptions},
};

/// Args for the `report` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Keyword the matching sentences must contain (defaults to KEYWORD).
    #[arg(long)]
    pub keyword: Option<String>,
    /// Comma separated entity texts selecting documents (defaults to the asymptomatic family).
    #[arg(long = "entity", value_delimiter = ',')]
    pub entities: Vec<String>,
    /// Match the keyword regardless of case.
    #[arg(long)]
    pub ignore_case: bool,
    /// Output file name under OUTPUTS_DIR (defaults to `<keyword>.csv`).
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl Args {
    pub fn options(&self, settings: &Settings) -> ReportOptions {
        let keyword = self
            .keyword
            .clone()
            .unwrap_or_else(|| settings.keyword.clone());
        let mut options = ReportOptions::for_keyword(keyword);
        if !self.entities.is_empty() {
            options.targets = self.entities.clone();
        }
        options.case = CaseMatch::from_ignore_case(self.ignore_case);
        options
    }

    pub fn output_path(&self, settings: &Settings, keyword: &str) -> PathBuf {
        match &self.output {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => settings.join_output(path),
            None => settings.join_output(format!("{keyword}.csv")),
        }
    }
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let options = args.options(&settings);
    let output = args.output_path(&settings, &options.keyword);
    if let Some(rows) = report::keyword_report(&settings, &options, &output).await? {
        info!(rows = rows.len(), path = %output.display(), "keyword report ready");
    }
    Ok(())
}
