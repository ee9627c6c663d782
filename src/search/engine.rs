use std::time::Instant;
use tracing::debug;
use crate::core::error::{Error, ErrorKind, Result};
use crate::index::row_index::RowIndex;
use crate::query::ast::PhraseQuery;
use crate::query::matcher::PhraseMatcher;
use crate::query::sanitize::sanitize_phrase;
use crate::search::results::{HitCollector, SearchResult};

/// Answers phrase queries against a built [`RowIndex`].
///
/// Holds no state between calls and only ever takes read locks, so one
/// engine can serve any number of concurrent requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryEngine;

impl QueryEngine {
    pub fn new() -> Self {
        QueryEngine
    }

    /// Rows whose text contains `raw_phrase` as a contiguous phrase.
    ///
    /// The result cap is the current document count, so every match is
    /// returned. No match yields an empty vector, not an error.
    pub fn search(&self, index: &RowIndex, raw_phrase: &str) -> Result<Vec<SearchResult>> {
        let start = Instant::now();
        let phrase = sanitize_phrase(raw_phrase);
        let query = PhraseQuery::analyze(&phrase, index.analyzer());

        let limit = index.doc_count().map_err(|e| {
            Error::new(ErrorKind::CountUnavailable, format!("could not get search index count: {}", e.context))
        })?;

        let results = index
            .read(|state| {
                let mut collector = HitCollector::new(limit as usize);
                for row_id in PhraseMatcher::new(&state.inverted).matching_rows(&query) {
                    if collector.is_full() {
                        break;
                    }
                    if let Some(row) = state.rows.get(&row_id) {
                        collector.collect(SearchResult::from_row(row_id, row));
                    }
                }
                collector.get_results()
            })
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::SearchFailed,
                    format!("search for {:?} failed: index '{}' is closed", phrase, index.name()),
                )
            })?;

        debug!(
            index = index.name(),
            phrase = %phrase,
            hits = results.len(),
            took_us = start.elapsed().as_micros() as u64,
            "phrase search"
        );
        Ok(results)
    }
}
