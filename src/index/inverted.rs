use std::collections::HashMap;
use crate::analysis::token::Token;
use crate::core::types::RowId;
use crate::index::posting::{Posting, PostingList};

/// Term representation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Term(String);

impl Term {
    pub fn new(text: &str) -> Self {
        Term(text.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Positional inverted index over the combined text of every row
#[derive(Debug, Default)]
pub struct InvertedIndex {
    pub postings: HashMap<Term, PostingList>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        InvertedIndex {
            postings: HashMap::new(),
        }
    }

    /// Index one row. Token positions are row-wide, already offset per field.
    pub fn add_row(&mut self, row_id: RowId, tokens: &[Token]) {
        let mut term_positions: HashMap<Term, Vec<u32>> = HashMap::new();

        // Group tokens by term
        for token in tokens {
            term_positions.entry(Term::new(&token.text))
                .or_insert_with(Vec::new)
                .push(token.position);
        }

        for (term, mut positions) in term_positions {
            positions.sort_unstable();
            positions.dedup();
            self.postings.entry(term)
                .or_insert_with(PostingList::new)
                .add_posting(Posting { row_id, positions });
        }
    }

    pub fn search_term(&self, term: &Term) -> Option<&PostingList> {
        self.postings.get(term)
    }
}
