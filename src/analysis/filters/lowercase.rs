use crate::analysis::filter::TokenFilter;
use crate::analysis::token::Token;

/// Folds case so `Side-1752` and `SIDE-1752` analyze alike.
pub struct LowercaseFilter;

impl TokenFilter for LowercaseFilter {
    fn filter(&self, mut tokens: Vec<Token>) -> Vec<Token> {
        for token in tokens.iter_mut() {
            if token.text.chars().any(char::is_uppercase) {
                token.text = token.text.to_lowercase();
                token.length = token.text.len();
            }
        }
        tokens
    }

    fn name(&self) -> &str {
        "lowercase"
    }
}
