use roaring::RoaringTreemap;
use crate::core::types::RowId;
use crate::index::inverted::{InvertedIndex, Term};
use crate::index::posting::Posting;
use crate::query::ast::PhraseQuery;

/// Phrase matcher over a positional inverted index
pub struct PhraseMatcher<'a> {
    index: &'a InvertedIndex,
}

impl<'a> PhraseMatcher<'a> {
    pub fn new(index: &'a InvertedIndex) -> Self {
        PhraseMatcher { index }
    }

    /// Rows containing the phrase, in ascending id order.
    pub fn matching_rows(&self, query: &PhraseQuery) -> Vec<RowId> {
        if query.is_empty() {
            return Vec::new();
        }

        let mut lists = Vec::with_capacity(query.terms.len());
        for term in &query.terms {
            match self.index.search_term(&Term::new(&term.text)) {
                Some(list) => lists.push(list),
                // Term not in index at all
                None => return Vec::new(),
            }
        }

        // Rows holding every term
        let mut candidates: Option<RoaringTreemap> = None;
        for list in &lists {
            let ids = list.row_ids();
            candidates = Some(match candidates {
                None => ids,
                Some(acc) => acc & ids,
            });
        }

        let candidates = candidates.unwrap_or_default();
        let mut rows = Vec::new();
        for id in candidates.iter() {
            let row_id = RowId(id);
            let postings: Option<Vec<&Posting>> = lists.iter().map(|l| l.get(row_id)).collect();
            if let Some(postings) = postings {
                if self.check_positions(query, &postings) {
                    rows.push(row_id);
                }
            }
        }

        rows
    }

    /// Every term must sit at `start + offset` for some occurrence of the
    /// first term.
    fn check_positions(&self, query: &PhraseQuery, postings: &[&Posting]) -> bool {
        postings[0].positions.iter().any(|&start| {
            query.terms
                .iter()
                .zip(postings)
                .skip(1)
                .all(|(term, posting)| posting.has_position(start + term.offset))
        })
    }
}
