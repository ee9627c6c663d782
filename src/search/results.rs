use std::collections::HashMap;
use serde::{Serialize, Deserialize};
use crate::core::types::{Row, RowId};

/// One matched row with every field it was indexed with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub row_id: RowId,
    pub fields: HashMap<String, String>,
}

impl SearchResult {
    pub fn from_row(row_id: RowId, row: &Row) -> Self {
        SearchResult {
            row_id,
            fields: row.to_map(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }
}

/// Collects hits in engine order up to a size cap
pub struct HitCollector {
    pub hits: Vec<SearchResult>,
    pub limit: usize,
}

impl HitCollector {
    pub fn new(limit: usize) -> Self {
        HitCollector {
            hits: Vec::with_capacity(limit.min(1024)),
            limit,
        }
    }

    pub fn collect(&mut self, result: SearchResult) {
        if self.hits.len() < self.limit {
            self.hits.push(result);
        }
    }

    pub fn is_full(&self) -> bool {
        self.hits.len() >= self.limit
    }

    pub fn get_results(self) -> Vec<SearchResult> {
        self.hits
    }
}
