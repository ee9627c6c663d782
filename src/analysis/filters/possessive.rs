use crate::analysis::filter::TokenFilter;
use crate::analysis::token::Token;

/// Strips the English possessive suffix (`'s`, `’s`) from tokens.
pub struct PossessiveFilter;

const SUFFIXES: [&str; 4] = ["'s", "'S", "\u{2019}s", "\u{2019}S"];

impl TokenFilter for PossessiveFilter {
    fn filter(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens.into_iter()
            .map(|mut token| {
                if let Some(stripped) = SUFFIXES.iter().find_map(|s| token.text.strip_suffix(s)) {
                    if !stripped.is_empty() {
                        token.text = stripped.to_string();
                        token.length = token.text.len();
                    }
                }
                token
            })
            .collect()
    }

    fn name(&self) -> &str {
        "possessive"
    }
}
