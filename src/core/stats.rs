use std::time::Duration;
use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

/// Outcome of one indexing pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexStats {
    pub tables: usize,
    pub rows: usize,
    pub flushes: usize,
    pub elapsed: Duration,
    pub finished_at: DateTime<Utc>,
}

impl IndexStats {
    pub fn new() -> Self {
        IndexStats {
            tables: 0,
            rows: 0,
            flushes: 0,
            elapsed: Duration::ZERO,
            finished_at: Utc::now(),
        }
    }

    /// Fold the counters of a single table pass into the aggregate.
    pub fn absorb(&mut self, table: &TableStats) {
        self.tables += 1;
        self.rows += table.rows;
        self.flushes += table.flushes;
    }

    pub fn rows_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.rows as f64 / secs
        } else {
            0.0
        }
    }
}

impl Default for IndexStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Counters for a single table pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStats {
    pub rows: usize,
    pub flushes: usize,
}
