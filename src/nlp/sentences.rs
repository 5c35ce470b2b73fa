//! Rule-based sentence segmentation and keyword token matching.

use indexmap::IndexSet;

/// A sentence with byte offsets into the paragraph it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

/// How keyword tokens are compared with sentence tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CaseMatch {
    #[default]
    Sensitive,
    Insensitive,
}

impl CaseMatch {
    pub fn from_ignore_case(ignore_case: bool) -> Self {
        if ignore_case {
            Self::Insensitive
        } else {
            Self::Sensitive
        }
    }

    fn matches(self, a: &str, b: &str) -> bool {
        match self {
            Self::Sensitive => a == b,
            Self::Insensitive => a.to_lowercase() == b.to_lowercase(),
        }
    }
}

/// Words that take a trailing period without ending a sentence.
const ABBREVIATIONS: &[&str] = &[
    "al", "approx", "ca", "cf", "dr", "e.g", "eq", "eqs", "fig", "figs", "i.e", "mr", "mrs",
    "ms", "no", "nos", "pp", "ref", "refs", "resp", "sp", "spp", "st", "suppl", "tab", "viz",
    "vol", "vs",
];

/// Split paragraph text into sentences.
pub fn split_sentences(text: &str) -> Vec<Sentence> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let (pos, ch) = chars[i];

        if ch == '\n' {
            let mut j = i + 1;
            while j < chars.len() && chars[j].1 != '\n' && chars[j].1.is_whitespace() {
                j += 1;
            }
            if j < chars.len() && chars[j].1 == '\n' {
                push_trimmed(&mut sentences, text, start, pos);
                start = chars[j].0 + 1;
                i = j + 1;
                continue;
            }
        }

        if matches!(ch, '.' | '!' | '?') {
            let mut j = i + 1;
            while j < chars.len() && is_closing(chars[j].1) {
                j += 1;
            }
            let mut k = j;
            while k < chars.len() && chars[k].1.is_whitespace() {
                k += 1;
            }

            let boundary = if j == k && j < chars.len() {
                false
            } else if k >= chars.len() {
                true
            } else {
                opens_sentence(chars[k].1) && !(ch == '.' && is_abbreviation(&text[start..pos]))
            };

            if boundary {
                let end = chars.get(j).map_or(text.len(), |(p, _)| *p);
                push_trimmed(&mut sentences, text, start, end);
                start = end;
            }
            i = j;
            continue;
        }

        i += 1;
    }

    push_trimmed(&mut sentences, text, start, text.len());
    sentences
}

fn is_closing(ch: char) -> bool {
    matches!(
        ch,
        '.' | '!' | '?' | '"' | '\'' | ')' | ']' | '\u{201d}' | '\u{2019}'
    )
}

fn opens_sentence(ch: char) -> bool {
    ch.is_uppercase() || ch.is_ascii_digit() || matches!(ch, '(' | '[' | '"' | '\u{201c}')
}

fn is_abbreviation(preceding: &str) -> bool {
    let word = preceding
        .rsplit(|c: char| c.is_whitespace() || c == '(' || c == '[')
        .next()
        .unwrap_or_default();
    let word = word.trim_start_matches(|c: char| !c.is_alphanumeric());
    let mut letters = word.chars();
    if let (Some(first), None) = (letters.next(), letters.next()) {
        return first.is_alphabetic();
    }
    let lower = word.to_lowercase();
    ABBREVIATIONS.contains(&lower.as_str())
}

fn push_trimmed(out: &mut Vec<Sentence>, text: &str, start: usize, end: usize) {
    let slice = &text[start..end];
    let trimmed = slice.trim();
    if trimmed.is_empty() {
        return;
    }
    let lead = slice.len() - slice.trim_start().len();
    out.push(Sentence {
        start: start + lead,
        end: start + lead + trimmed.len(),
        text: trimmed.to_string(),
    });
}

/// Maximal runs of alphanumeric characters.
pub fn tokens(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect()
}

/// True when the keyword's tokens appear contiguously in `sentence`.
pub fn contains_keyword(sentence: &str, keyword: &str, case: CaseMatch) -> bool {
    let needle = tokens(keyword);
    if needle.is_empty() {
        return false;
    }
    let haystack = tokens(sentence);
    haystack
        .windows(needle.len())
        .any(|window| window.iter().zip(&needle).all(|(a, b)| case.matches(a, b)))
}

/// Sentences across `texts` containing the keyword, unique by text, in
/// first-seen order.
pub fn keyword_sentences<'a, I>(texts: I, keyword: &str, case: CaseMatch) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = IndexSet::new();
    for text in texts {
        for sentence in split_sentences(text) {
            if contains_keyword(&sentence.text, keyword, case) {
                seen.insert(sentence.text);
            }
        }
    }
    seen.into_iter().collect()
}
