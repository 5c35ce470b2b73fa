use corpus_miner::nlp::sentences::{
    contains_keyword, keyword_sentences, split_sentences, tokens, CaseMatch,
};
use proptest::prelude::*;

#[test]
fn abbreviations_and_figures_do_not_split() {
    let text = "Cases rose (see Fig. 2). Most were asymptomatic, e.g. children. Others had fever!";
    let sents: Vec<_> = split_sentences(text).into_iter().map(|s| s.text).collect();
    assert_eq!(
        sents,
        vec![
            "Cases rose (see Fig. 2).",
            "Most were asymptomatic, e.g. children.",
            "Others had fever!",
        ]
    );
}

#[test]
fn decimals_and_lowercase_continuations_stay_together() {
    let sents = split_sentences("The R0 was 2.5 in Wuhan et al. reported similar values.");
    assert_eq!(sents.len(), 1);
}

#[test]
fn offsets_point_back_into_paragraph() {
    let text = "  First one.   Second one?  ";
    for sentence in split_sentences(text) {
        assert_eq!(&text[sentence.start..sentence.end], sentence.text);
    }
}

#[test]
fn tokens_split_on_hyphens_and_slashes() {
    assert_eq!(
        tokens("asymptomatic-to-mild/severe (n=3)"),
        vec!["asymptomatic", "to", "mild", "severe", "n", "3"]
    );
}

#[test]
fn keyword_matching_is_token_exact() {
    let sensitive = CaseMatch::Sensitive;
    assert!(contains_keyword("asymptomatic-to-mild cases", "asymptomatic", sensitive));
    assert!(!contains_keyword("Asymptomatic cases", "asymptomatic", sensitive));
    assert!(contains_keyword("Asymptomatic cases", "asymptomatic", CaseMatch::Insensitive));
    assert!(!contains_keyword("presymptomatic cases", "asymptomatic", sensitive));
    assert!(contains_keyword("An asymptomatic infection was seen", "asymptomatic infection", sensitive));
    assert!(!contains_keyword("An asymptomatic mild infection", "asymptomatic infection", sensitive));
    assert!(!contains_keyword("anything", "  ", sensitive));
}

#[test]
fn keyword_sentences_are_unique_and_ordered() {
    let paragraphs = [
        "Children were asymptomatic. Adults had fever.",
        "We saw fever. Children were asymptomatic.",
        "Shedding was asymptomatic in 5 cases.",
    ];
    let found = keyword_sentences(paragraphs, "asymptomatic", CaseMatch::Sensitive);
    assert_eq!(
        found,
        vec![
            "Children were asymptomatic.",
            "Shedding was asymptomatic in 5 cases.",
        ]
    );
}

proptest! {
    #[test]
    fn sentences_are_ordered_trimmed_slices(text in "\\PC{0,200}") {
        let sentences = split_sentences(&text);
        let mut last_end = 0;
        for sentence in &sentences {
            prop_assert!(sentence.start >= last_end);
            prop_assert!(sentence.end <= text.len());
            prop_assert_eq!(&text[sentence.start..sentence.end], sentence.text.as_str());
            prop_assert!(!sentence.text.is_empty());
            prop_assert_eq!(sentence.text.trim(), sentence.text.as_str());
            last_end = sentence.end;
        }
    }

    #[test]
    fn prose_with_newlines_round_trips(text in "[A-Za-z .!?\n()]{0,200}") {
        for sentence in split_sentences(&text) {
            prop_assert_eq!(&text[sentence.start..sentence.end], sentence.text.as_str());
        }
    }
}
