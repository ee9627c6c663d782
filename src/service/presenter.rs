use crate::core::error::Error;
use crate::search::results::SearchResult;
use crate::service::notifier::Notification;

/// Turns search output into host notifications
#[derive(Debug, Clone)]
pub struct ResultPresenter {
    pub label_limit: usize,
}

impl ResultPresenter {
    pub fn new(label_limit: usize) -> Self {
        ResultPresenter { label_limit }
    }

    /// One notification per matched row; fields listed by name.
    pub fn present(&self, phrase: &str, result: &SearchResult) -> Notification {
        let mut fields: Vec<(&String, &String)> = result.fields.iter().collect();
        fields.sort();

        let markdown = fields
            .into_iter()
            .map(|(name, value)| format!("**{}**: {}", name, value.replace('\n', " ")))
            .collect::<Vec<_>>()
            .join("\n\n");

        Notification::new(format!("matched {:?}", self.truncate(phrase)), markdown)
    }

    /// Sent once when the index could not be built.
    pub fn unavailable(&self, err: &Error) -> Notification {
        Notification::new(
            "Sheet search unavailable",
            format!("The search index could not be built, so sheet search is off for this session.\n\n`{}`", err),
        )
    }

    fn truncate(&self, phrase: &str) -> String {
        if phrase.chars().count() <= self.label_limit {
            return phrase.to_string();
        }
        let mut short: String = phrase.chars().take(self.label_limit).collect();
        short.push('…');
        short
    }
}
