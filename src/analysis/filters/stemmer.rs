use rust_stemmers::{Algorithm, Stemmer};
use crate::analysis::filter::TokenFilter;
use crate::analysis::token::{Token, TokenType};

/// Snowball stemming. Numeric tokens such as issue numbers pass through.
pub struct StemmerFilter {
    stemmer: Stemmer,
}

impl StemmerFilter {
    pub fn english() -> Self {
        StemmerFilter {
            stemmer: Stemmer::create(Algorithm::English),
        }
    }
}

impl TokenFilter for StemmerFilter {
    fn filter(&self, mut tokens: Vec<Token>) -> Vec<Token> {
        for token in tokens.iter_mut().filter(|t| t.token_type == TokenType::Word) {
            let stem = self.stemmer.stem(&token.text).into_owned();
            token.text = stem;
        }
        tokens
    }

    fn name(&self) -> &str {
        "stemmer"
    }
}
