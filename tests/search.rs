use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use tablesift::core::config::Config;
use tablesift::core::types::{Row, Table};
use tablesift::{ErrorKind, IndexBuilder, QueryEngine, RowIndex};

fn issue(key: &str, summary: &str, status: &str) -> Row {
    Row::new()
        .with_field("Key", key)
        .with_field("Summary", summary)
        .with_field("Status", status)
}

fn fixture_tables() -> Vec<Table> {
    let headers = vec!["Key".to_string(), "Summary".to_string(), "Status".to_string()];

    let mut jira = Table::new("jira", headers.clone());
    jira.push_row(issue("SIDE-1752", "Login page broken on Safari", "Open"));
    jira.push_row(issue("SIDE-1753", "Export to \"CSV\" drops the header row", "Closed"));
    jira.push_row(issue("SIDE-1800", "Dark mode toggle", "In Progress"));

    let mut support = Table::new("support", vec!["Ticket".to_string(), "Customer".to_string(), "Notes".to_string()]);
    support.push_row(
        Row::new()
            .with_field("Ticket", "T-9")
            .with_field("Customer", "Acme Corp")
            .with_field("Notes", "Duplicate of SIDE-1752, login page broken"),
    );
    support.push_row(
        Row::new()
            .with_field("Ticket", "T-10")
            .with_field("Customer", "Globex")
            .with_field("Notes", "Wants foo bar reporting"),
    );

    vec![jira, support]
}

fn build(analyzer: &str) -> RowIndex {
    let builder = IndexBuilder::new(Config {
        analyzer: analyzer.to_string(),
        indexing_threads: 2,
        ..Config::default()
    })
    .unwrap();
    let index = builder.create_index("search-tests").unwrap();
    builder.index_tables(&index, &fixture_tables()).unwrap();
    index
}

fn keys(results: &[tablesift::SearchResult], field: &str) -> Vec<String> {
    let mut keys: Vec<String> = results
        .iter()
        .filter_map(|r| r.get(field).map(str::to_string))
        .collect();
    keys.sort();
    keys
}

#[test]
fn identifier_round_trips_whole_row() {
    let index = build("en");
    let results = QueryEngine::new().search(&index, "SIDE-1752").unwrap();

    assert_eq!(results.len(), 2);
    let jira = results.iter().find(|r| r.get("Key") == Some("SIDE-1752")).unwrap();
    let expected: HashMap<String, String> =
        issue("SIDE-1752", "Login page broken on Safari", "Open").to_map();
    assert_eq!(jira.fields, expected);

    let support = results.iter().find(|r| r.get("Ticket") == Some("T-9")).unwrap();
    assert_eq!(support.fields.len(), 3);
}

#[test]
fn quoted_and_unquoted_phrases_agree() {
    let index = build("en");
    let engine = QueryEngine::new();

    let quoted = engine.search(&index, "foo \"bar\"").unwrap();
    let plain = engine.search(&index, "foo bar").unwrap();
    assert_eq!(quoted, plain);
    assert_eq!(keys(&plain, "Ticket"), vec!["T-10"]);

    let pasted = engine.search(&index, "\"SIDE-1753\"").unwrap();
    assert_eq!(keys(&pasted, "Key"), vec!["SIDE-1753"]);
}

#[test]
fn phrase_with_quotes_inside_cell_is_searchable() {
    let index = build("en");
    let results = QueryEngine::new().search(&index, "Export to \"CSV\" drops").unwrap();
    assert_eq!(keys(&results, "Key"), vec!["SIDE-1753"]);
}

#[test]
fn no_match_is_empty_not_error() {
    let index = build("en");
    let engine = QueryEngine::new();
    assert!(engine.search(&index, "kubernetes cluster").unwrap().is_empty());
    assert!(engine.search(&index, "\"\"").unwrap().is_empty());
    assert!(engine.search(&index, "the of").unwrap().is_empty());
}

#[test]
fn english_analyzer_ignores_case() {
    let index = build("en");
    let engine = QueryEngine::new();

    let mixed = engine.search(&index, "Side-1752").unwrap();
    let upper = engine.search(&index, "SIDE-1752").unwrap();
    assert_eq!(mixed, upper);
    assert_eq!(mixed.len(), 2);

    // stemming applies on both sides too
    let stemmed = engine.search(&index, "logins pages").unwrap();
    assert_eq!(keys(&stemmed, "Key"), vec!["SIDE-1752"]);
}

#[test]
fn keyword_analyzer_is_case_sensitive() {
    let index = build("keyword");
    let engine = QueryEngine::new();

    assert_eq!(engine.search(&index, "SIDE-1752").unwrap().len(), 1);
    assert!(engine.search(&index, "Side-1752").unwrap().is_empty());
    // a keyword index only matches whole cell values
    assert!(engine.search(&index, "Login page").unwrap().is_empty());
}

#[test]
fn keyword_analyzer_matches_exact_cell_text() {
    let builder = IndexBuilder::new(Config {
        analyzer: "keyword".to_string(),
        ..Config::default()
    })
    .unwrap();
    let index = builder.create_index("spacing").unwrap();
    let rows = vec![
        Row::new().with_field("Key", "SIDE  1752"),
        Row::new().with_field("Key", "SIDE 1752"),
    ];
    builder.index_table(&index, &rows).unwrap();

    let engine = QueryEngine::new();
    let double = engine.search(&index, "SIDE  1752").unwrap();
    assert_eq!(double.len(), 1);
    assert_eq!(double[0].get("Key"), Some("SIDE  1752"));

    let single = engine.search(&index, "\"SIDE 1752\"").unwrap();
    assert_eq!(single.len(), 1);
    assert_eq!(single[0].get("Key"), Some("SIDE 1752"));
}

#[test]
fn phrase_must_be_contiguous_and_ordered() {
    let index = build("en");
    let engine = QueryEngine::new();

    assert_eq!(keys(&engine.search(&index, "login page broken").unwrap(), "Key"), vec!["SIDE-1752"]);
    assert!(engine.search(&index, "page login").unwrap().is_empty());
    assert!(engine.search(&index, "login broken").unwrap().is_empty());
}

#[test]
fn phrase_does_not_span_fields() {
    let index = build("en");
    // "Safari" ends Summary and "Open" is the whole Status field
    assert!(QueryEngine::new().search(&index, "Safari Open").unwrap().is_empty());
}

#[test]
fn search_never_mutates_index() {
    let index = build("en");
    let before = index.doc_count().unwrap();
    for _ in 0..5 {
        QueryEngine::new().search(&index, "SIDE-1752").unwrap();
    }
    assert_eq!(index.doc_count().unwrap(), before);
}

#[test]
fn closed_index_reports_count_unavailable() {
    let index = build("en");
    index.close();
    let err = QueryEngine::new().search(&index, "SIDE-1752").unwrap_err();
    assert_eq!(err.kind, ErrorKind::CountUnavailable);
}

#[test]
fn result_size_is_not_truncated() {
    let builder = IndexBuilder::new(Config::default()).unwrap();
    let index = builder.create_index("many").unwrap();
    let rows: Vec<Row> = (0..350)
        .map(|i| Row::new().with_field("Id", i.to_string()).with_field("Tag", "shared marker"))
        .collect();
    builder.index_table(&index, &rows).unwrap();

    let results = QueryEngine::new().search(&index, "shared marker").unwrap();
    assert_eq!(results.len(), 350);
}

#[test]
fn concurrent_searches_are_consistent() {
    let index = Arc::new(build("en"));
    let expected = QueryEngine::new().search(&index, "SIDE-1752").unwrap();

    thread::scope(|scope| {
        for worker in 0..16 {
            let index = index.clone();
            let expected = expected.clone();
            scope.spawn(move || {
                let engine = QueryEngine::new();
                for _ in 0..50 {
                    let phrase = if worker % 2 == 0 { "SIDE-1752" } else { "\"side-1752\"" };
                    let results = engine.search(&index, phrase).unwrap();
                    assert_eq!(results, expected);
                    for result in &results {
                        assert!(result.fields.values().any(|v| v.contains("SIDE-1752")));
                    }
                }
            });
        }
    });
}
