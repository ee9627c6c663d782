use std::sync::LazyLock;
use regex::Regex;

// Straight and typographic double quotes, as pasted from spreadsheet cells
static QUOTES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("[\"\u{201C}\u{201D}\u{201E}]").expect("valid quote pattern")
});

/// Strip the quote characters the phrase syntax cannot carry. Everything
/// else, whitespace included, is left for the analyzer.
pub fn sanitize_phrase(raw: &str) -> String {
    QUOTES.replace_all(raw, "").into_owned()
}
