use std::sync::atomic::{AtomicU64, Ordering};
use crate::core::types::RowId;

/// Hands out row identifiers for one indexing session.
///
/// Ids start at 1 and increase by one per call, so after `n` calls the ids
/// `1..=n` have been issued exactly once each. Every session owns its own
/// allocator; two sessions never share a counter.
#[derive(Debug, Default)]
pub struct RowIdAllocator {
    last: AtomicU64,
}

impl RowIdAllocator {
    pub fn new() -> Self {
        RowIdAllocator {
            last: AtomicU64::new(0),
        }
    }

    pub fn next(&self) -> RowId {
        RowId(self.last.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Number of ids issued so far.
    pub fn allocated(&self) -> u64 {
        self.last.load(Ordering::Relaxed)
    }
}
