//! Lexicon and pattern based biomedical NER.
//!
//! Recognisers implement [`Ner`]; [`load_model`] wires the default stack. A
//! model-backed recogniser only has to implement the same trait.

use std::{path::Path, sync::Arc};

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use crate::config::Settings;

/// Extracted entity span with byte offsets relative to the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub label: String,
    pub text: String,
    pub score: f64,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Trait for NER implementations.
pub trait Ner: Send + Sync {
    fn extract(&self, text: &str) -> Vec<Span>;
}

static DISEASE_TERMS: &[&str] = &[
    "covid-19",
    "covid19",
    "sars",
    "mers",
    "severe acute respiratory syndrome",
    "middle east respiratory syndrome",
    "pneumonia",
    "viral pneumonia",
    "influenza",
    "acute respiratory distress syndrome",
    "ards",
    "respiratory infection",
    "respiratory tract infection",
    "lower respiratory tract infection",
    "upper respiratory tract infection",
    "sepsis",
    "septic shock",
    "myocarditis",
    "hypertension",
    "diabetes",
    "diabetes mellitus",
    "obesity",
    "chronic obstructive pulmonary disease",
    "copd",
    "asthma",
    "kawasaki disease",
    "acute kidney injury",
    "bronchiolitis",
    "tuberculosis",
];

static PATHOGEN_TERMS: &[&str] = &[
    "coronavirus",
    "novel coronavirus",
    "sars-cov-2",
    "sars-cov",
    "mers-cov",
    "2019-ncov",
    "hcov-229e",
    "hcov-oc43",
    "hcov-nl63",
    "hcov-hku1",
    "betacoronavirus",
    "influenza virus",
    "influenza a virus",
    "respiratory syncytial virus",
    "rsv",
    "rhinovirus",
    "adenovirus",
    "bat coronavirus",
];

static SYMPTOM_TERMS: &[&str] = &[
    "fever",
    "cough",
    "dry cough",
    "fatigue",
    "dyspnea",
    "dyspnoea",
    "shortness of breath",
    "sore throat",
    "headache",
    "myalgia",
    "diarrhea",
    "diarrhoea",
    "nausea",
    "vomiting",
    "anosmia",
    "ageusia",
    "chills",
    "rhinorrhea",
    "chest pain",
    "hypoxemia",
    "lymphopenia",
];

/// Clinical findings; the asymptomatic family drives the default report.
static FINDING_TERMS: &[&str] = &[
    "asymptomatic",
    "asymptomatically",
    "asymptomatic carrier",
    "asymptomatic carriers",
    "asymptomatic carrier phase",
    "asymptomatic controls",
    "asymptomatic infection",
    "asymptomatic infections",
    "asymptomatic transmission",
    "asymptomatic line",
    "asymptomatic-to-mild ones",
    "asymptomatic/mild infections",
    "clinically asymptomatic",
    "delay-adjusted asymptomatic",
    "prodromal/asymptomatic stages",
    "respiratory asymptomatic",
    "sars-cov-2 asymptomatic",
    "presymptomatic",
    "pre-symptomatic",
    "paucisymptomatic",
    "symptomatic",
    "viral shedding",
    "viral load",
    "incubation period",
    "ground-glass opacity",
    "ground-glass opacities",
    "cytokine storm",
    "seroconversion",
];

static CHEMICAL_TERMS: &[&str] = &[
    "remdesivir",
    "chloroquine",
    "hydroxychloroquine",
    "lopinavir",
    "ritonavir",
    "favipiravir",
    "ribavirin",
    "oseltamivir",
    "azithromycin",
    "dexamethasone",
    "tocilizumab",
    "interferon",
    "corticosteroids",
    "heparin",
    "ivermectin",
];

static GENE_TERMS: &[&str] = &[
    "ace2",
    "angiotensin-converting enzyme 2",
    "tmprss2",
    "spike protein",
    "spike glycoprotein",
    "nucleocapsid protein",
    "receptor-binding domain",
    "il-6",
    "interleukin-6",
    "tnf-alpha",
    "rdrp",
    "rna-dependent rna polymerase",
    "3cl protease",
    "main protease",
];

/// Whole-word, ASCII-case-insensitive term lookup.
#[derive(Debug, Clone, Default)]
pub struct DictionaryNer {
    /// `(lowercased term, label)`.
    terms: Vec<(String, String)>,
}

impl DictionaryNer {
    /// Dictionary seeded with the built-in biomedical lexicon.
    pub fn builtin() -> Self {
        let mut ner = Self::default();
        ner.extend(DISEASE_TERMS, "DISEASE");
        ner.extend(PATHOGEN_TERMS, "PATHOGEN");
        ner.extend(SYMPTOM_TERMS, "SYMPTOM");
        ner.extend(FINDING_TERMS, "FINDING");
        ner.extend(CHEMICAL_TERMS, "CHEMICAL");
        ner.extend(GENE_TERMS, "GENE_OR_PROTEIN");
        ner
    }

    pub fn extend(&mut self, terms: &[&str], label: &str) {
        for term in terms {
            self.insert(term, label);
        }
    }

    /// Add one term; blank and duplicate terms are ignored.
    pub fn insert(&mut self, term: &str, label: &str) {
        let key = term.trim().to_ascii_lowercase();
        if key.is_empty() || self.terms.iter().any(|(t, _)| *t == key) {
            return;
        }
        self.terms.push((key, label.to_string()));
    }

    /// Merge a `term<TAB>label` file. `#` starts a comment line; a missing
    /// label defaults to `ENTITY`.
    pub fn load_lexicon(&mut self, path: &Path) -> Result<usize> {
        let raw =
            std::fs::read_to_string(path).with_context(|| format!("read lexicon {path:?}"))?;
        let before = self.terms.len();
        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '\t');
            let term = parts.next().unwrap_or_default();
            let label = parts
                .next()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .unwrap_or("ENTITY");
            self.insert(term, label);
        }
        Ok(self.terms.len() - before)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl Ner for DictionaryNer {
    fn extract(&self, text: &str) -> Vec<Span> {
        // ASCII folding keeps byte offsets aligned with `text`.
        let lower = text.to_ascii_lowercase();
        let mut spans = Vec::new();
        for (term, label) in &self.terms {
            let mut start_pos = 0;
            while let Some(pos) = lower[start_pos..].find(term.as_str()) {
                let start = start_pos + pos;
                let end = start + term.len();
                if is_word_boundary(&lower, start, end) {
                    spans.push(Span {
                        start,
                        end,
                        label: label.clone(),
                        text: text[start..end].to_string(),
                        score: 0.9,
                    });
                }
                start_pos = start + lower[start..].chars().next().map_or(1, char::len_utf8);
            }
        }
        spans
    }
}

fn is_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9]+(?:-[A-Za-z0-9]+)*\b").expect("valid identifier regex")
});

/// Identifier-shaped tokens such as `SARS-CoV-2`, `ACE2` or `IL-6`.
///
/// A candidate needs an uppercase letter plus either a second uppercase
/// letter or a digit, so ordinary capitalised words are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternNer;

impl PatternNer {
    fn is_identifier(token: &str) -> bool {
        let upper = token.chars().filter(char::is_ascii_uppercase).count();
        let digits = token.chars().filter(char::is_ascii_digit).count();
        upper >= 1 && (upper >= 2 || digits >= 1)
    }
}

impl Ner for PatternNer {
    fn extract(&self, text: &str) -> Vec<Span> {
        IDENTIFIER
            .find_iter(text)
            .filter(|m| Self::is_identifier(m.as_str()))
            .map(|m| Span {
                start: m.start(),
                end: m.end(),
                label: "IDENTIFIER".to_string(),
                text: m.as_str().to_string(),
                score: 0.6,
            })
            .collect()
    }
}

/// Runs several recognisers and keeps a non-overlapping selection.
pub struct CompositeNer {
    members: Vec<Box<dyn Ner>>,
}

impl CompositeNer {
    /// Earlier members win ties between identical spans.
    pub fn new(members: Vec<Box<dyn Ner>>) -> Self {
        Self { members }
    }
}

impl Ner for CompositeNer {
    fn extract(&self, text: &str) -> Vec<Span> {
        let mut candidates: Vec<(usize, Span)> = self
            .members
            .iter()
            .enumerate()
            .flat_map(|(rank, ner)| ner.extract(text).into_iter().map(move |s| (rank, s)))
            .filter(|(_, s)| !s.is_empty())
            .collect();
        candidates.sort_by(|(ra, a), (rb, b)| {
            b.len()
                .cmp(&a.len())
                .then(a.start.cmp(&b.start))
                .then(ra.cmp(rb))
        });

        let mut kept: Vec<Span> = Vec::new();
        for (_, span) in candidates {
            if kept.iter().all(|k| !k.overlaps(&span)) {
                kept.push(span);
            }
        }
        kept.sort_by_key(|s| s.start);
        kept
    }
}

/// Build the default recogniser: built-in lexicon, configured lexicon file,
/// then identifier patterns.
pub fn load_model(settings: &Settings) -> Result<Arc<dyn Ner>> {
    let mut dictionary = DictionaryNer::builtin();
    if let Some(path) = &settings.lexicon_path {
        let added = dictionary.load_lexicon(path)?;
        info!(path = %path.display(), added, "merged entity lexicon");
    }
    info!(terms = dictionary.len(), "dictionary NER ready");
    let composite = CompositeNer::new(vec![Box::new(dictionary), Box::new(PatternNer)]);
    Ok(Arc::new(composite) as Arc<dyn Ner>)
}
