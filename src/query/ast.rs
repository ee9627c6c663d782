use serde::{Serialize, Deserialize};
use crate::analysis::analyzer::Analyzer;

/// One analyzed term of a phrase and its distance from the first term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseTerm {
    pub text: String,
    pub offset: u32,
}

/// Exact phrase query: every term must occur at its offset relative to the
/// first term, within the same field of a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseQuery {
    pub phrase: String,
    pub terms: Vec<PhraseTerm>,
}

impl PhraseQuery {
    /// Analyze `phrase` with the same analyzer the index was built with.
    /// Gaps left by removed stop words are kept in the offsets.
    pub fn analyze(phrase: &str, analyzer: &Analyzer) -> Self {
        let tokens = analyzer.analyze(phrase);
        let first = tokens.first().map(|t| t.position).unwrap_or(0);

        PhraseQuery {
            phrase: phrase.to_string(),
            terms: tokens
                .into_iter()
                .map(|token| PhraseTerm {
                    offset: token.position - first,
                    text: token.text,
                })
                .collect(),
        }
    }

    /// A phrase with no searchable terms matches nothing.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
