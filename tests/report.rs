use std::{collections::BTreeMap, fs, path::PathBuf};

use corpus_miner::{
    data::metadata::{MetadataIndex, MetadataRecord},
    nlp::{sentences::CaseMatch, Mention},
    report::{
        frequency,
        keyword::{self, ReportOptions, ReportRow},
    },
};

fn mention(entity: &str, source: &str) -> Mention {
    Mention {
        entity: entity.into(),
        label: "FINDING".into(),
        source: source.into(),
    }
}

fn row(source: &str, date: &str) -> ReportRow {
    ReportRow {
        source: source.into(),
        date: date.into(),
        study: format!("Study {source}"),
        url: format!("https://example.org/{source}"),
        snippet: "x".into(),
    }
}

#[test]
fn counts_are_exact_text_and_sorted() {
    let mentions = vec![
        mention("fever", "a"),
        mention("Asymptomatic", "a"),
        mention("fever", "b"),
        mention("asymptomatic", "b"),
        mention("fever", "c"),
    ];
    let counts = frequency::count_entities(&mentions);
    let ordered: Vec<_> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    assert_eq!(
        ordered,
        vec![("Asymptomatic", 1), ("asymptomatic", 1), ("fever", 3)]
    );
    assert_eq!(
        frequency::top_entities(&counts, 2),
        vec![("fever".to_string(), 3), ("Asymptomatic".to_string(), 1)]
    );
}

#[test]
fn entity_counts_csv_has_no_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out/entities.csv");
    let counts = frequency::count_entities(&[mention("viral load", "a"), mention("ACE2", "a")]);
    frequency::write_entity_counts(&counts, &path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "ACE2,1\nviral load,1\n");
}

#[test]
fn matching_sources_use_substring_and_first_seen_order() {
    let mentions = vec![
        mention("fever", "a"),
        mention("clinically asymptomatic", "c"),
        mention("Asymptomatic infection", "b"),
        mention("asymptomatic", "c"),
        mention("presymptomatic", "d"),
    ];
    let targets = vec!["asymptomatic".to_string(), "Asymptomatic".to_string()];
    assert_eq!(keyword::matching_sources(&mentions, &targets), vec!["c", "b"]);
}

#[test]
fn rows_sort_newest_first_with_unknown_dates_last() {
    let mut rows = vec![
        row("a", "2019"),
        row("b", ""),
        row("c", "2020 Mar 3"),
        row("d", "2020-04-01"),
        row("e", "not a date"),
        row("f", "2020-03-03"),
    ];
    keyword::sort_newest_first(&mut rows);
    let order: Vec<_> = rows.iter().map(|r| r.source.as_str()).collect();
    assert_eq!(order, vec!["d", "c", "f", "a", "b", "e"]);
}

#[test]
fn report_csv_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("asymptomatic.csv");
    let rows = vec![
        ReportRow {
            source: "b".into(),
            date: "2020-04-01".into(),
            study: "Household clusters".into(),
            url: "https://example.org/b".into(),
            snippet: "Most were asymptomatic. | Two asymptomatic carriers.".into(),
        },
        ReportRow {
            source: "a".into(),
            date: "2020 Mar 3".into(),
            study: "Early cases".into(),
            url: "https://example.org/a".into(),
            snippet: "One asymptomatic case.".into(),
        },
    ];
    keyword::write_report(&rows, &path).unwrap();
    let csv = fs::read_to_string(&path).unwrap();
    insta::assert_snapshot!(csv.trim_end(), @r"
    Date,Study,URL,Snippet
    2020-04-01,Household clusters,https://example.org/b,Most were asymptomatic. | Two asymptomatic carriers.
    2020 Mar 3,Early cases,https://example.org/a,One asymptomatic case.
    ");
}

#[test]
fn report_csv_leaves_missing_metadata_fields_bare() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("asymptomatic.csv");
    let rows = vec![
        ReportRow {
            source: "a".into(),
            date: String::new(),
            study: String::new(),
            url: String::new(),
            snippet: "Silent carriers, mostly children.".into(),
        },
        ReportRow {
            source: "b".into(),
            date: String::new(),
            study: String::new(),
            url: String::new(),
            snippet: String::new(),
        },
    ];
    keyword::write_report(&rows, &path).unwrap();
    let csv = fs::read_to_string(&path).unwrap();
    insta::assert_snapshot!(csv.trim_end(), @r#"
    Date,Study,URL,Snippet
    ,,,"Silent carriers, mostly children."
    ,,,
    "#);
}

#[test]
fn report_csv_without_rows_keeps_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("asymptomatic.csv");
    keyword::write_report(&[], &path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "Date,Study,URL,Snippet\n");
}

#[test]
fn build_rows_joins_metadata_and_collects_sentences() {
    let dir = tempfile::tempdir().unwrap();
    let article = |body: &str| {
        serde_json::json!({
            "paper_id": "x",
            "abstract": [],
            "body_text": [{"text": body, "section": "Results"}],
        })
        .to_string()
    };
    fs::write(
        dir.path().join("known.json"),
        article("Most were asymptomatic. Two were febrile. Asymptomatic shedding persisted."),
    )
    .unwrap();
    fs::write(dir.path().join("orphan.json"), article("Also asymptomatic.")).unwrap();

    let metadata = MetadataIndex::from_records(vec![MetadataRecord {
        sha: "known".into(),
        title: "Known study".into(),
        publish_time: "2020-05-01".into(),
        url: "https://example.org/known".into(),
        ..Default::default()
    }]);
    let articles: BTreeMap<String, PathBuf> = [
        ("known".to_string(), dir.path().join("known.json")),
        ("orphan".to_string(), dir.path().join("orphan.json")),
    ]
    .into_iter()
    .collect();

    let mut options = ReportOptions::for_keyword("asymptomatic");
    let rows = keyword::build_rows(&["known", "orphan", "gone"], &metadata, &articles, &options);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].study, "Known study");
    assert_eq!(rows[0].snippet, "Most were asymptomatic.");

    options.case = CaseMatch::Insensitive;
    let rows = keyword::build_rows(&["known"], &metadata, &articles, &options);
    assert_eq!(
        rows[0].snippet,
        "Most were asymptomatic. | Asymptomatic shedding persisted."
    );
}
