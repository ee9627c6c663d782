use serde::{Serialize, Deserialize};

/// Where a search request came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventSource {
    GlobalSearch,
    SearchBar,
    Clipboard,
}

/// A search request delivered by the host: a phrase, or the error the host
/// hit while producing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEvent {
    pub source: EventSource,
    pub phrase: String,
    pub error: Option<String>,
}

impl SearchEvent {
    pub fn phrase(source: EventSource, phrase: impl Into<String>) -> Self {
        SearchEvent {
            source,
            phrase: phrase.into(),
            error: None,
        }
    }

    pub fn failed(source: EventSource, error: impl Into<String>) -> Self {
        SearchEvent {
            source,
            phrase: String::new(),
            error: Some(error.into()),
        }
    }
}
