use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use parking_lot::RwLock;
use tracing::{debug, info};
use crate::analysis::analyzer::Analyzer;
use crate::analysis::token::Token;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::row_id::RowIdAllocator;
use crate::core::types::{Row, RowId, SessionId};
use crate::index::inverted::InvertedIndex;

/// Empty positions inserted between two fields of a row so a phrase can
/// never match across a field boundary.
pub const FIELD_POSITION_GAP: u32 = 100;

/// A row that has been analyzed and is ready to be committed.
#[derive(Debug, Clone)]
pub struct PreparedRow {
    pub position: usize,   // 0-based position within the source table
    pub row_id: RowId,
    pub row: Row,
    pub tokens: Vec<Token>,
}

/// Everything a reader needs: terms and the stored rows.
#[derive(Debug, Default)]
pub struct IndexState {
    pub inverted: InvertedIndex,
    pub rows: HashMap<RowId, Row>,
}

/// In-memory, append-only row index.
///
/// Written by a single builder, then shared read-only behind an `Arc`.
/// Each index numbers its own rows from 1, whichever builder writes them.
/// `close` releases the storage; afterwards every read or write fails.
pub struct RowIndex {
    id: SessionId,
    name: String,
    analyzer: Arc<Analyzer>,
    allocator: RowIdAllocator,
    state: RwLock<Option<IndexState>>,
}

impl RowIndex {
    pub fn new(name: impl Into<String>, analyzer: Arc<Analyzer>) -> Self {
        RowIndex {
            id: SessionId::new(),
            name: name.into(),
            analyzer,
            allocator: RowIdAllocator::new(),
            state: RwLock::new(Some(IndexState::default())),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn analyzer(&self) -> &Arc<Analyzer> {
        &self.analyzer
    }

    /// Source of this index's row ids.
    pub fn allocator(&self) -> &RowIdAllocator {
        &self.allocator
    }

    /// Analyze every field value of a row into one positional token stream.
    pub fn analyze_row(&self, row: &Row) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut base = 0u32;

        for (_, value) in row.iter() {
            let field_tokens = self.analyzer.analyze(value);
            let width = field_tokens.iter().map(|t| t.position + 1).max().unwrap_or(0);
            tokens.extend(field_tokens.into_iter().map(|mut token| {
                token.position += base;
                token
            }));
            base += width + FIELD_POSITION_GAP;
        }

        tokens
    }

    /// Commit a batch as one atomic write: either every row lands or none do.
    pub fn apply(&self, batch: Vec<PreparedRow>) -> Result<usize> {
        let mut guard = self.state.write();
        let state = guard.as_mut().ok_or_else(|| {
            Error::new(ErrorKind::FlushFailed, format!("index '{}' is closed", self.name))
        })?;

        let mut seen = HashSet::with_capacity(batch.len());
        for prepared in &batch {
            if state.rows.contains_key(&prepared.row_id) || !seen.insert(prepared.row_id) {
                return Err(Error::new(
                    ErrorKind::FlushFailed,
                    format!(
                        "could not write row {} (overall row {}): id already indexed",
                        prepared.position, prepared.row_id
                    ),
                ));
            }
        }

        let written = batch.len();
        for prepared in batch {
            state.inverted.add_row(prepared.row_id, &prepared.tokens);
            state.rows.insert(prepared.row_id, prepared.row);
        }

        debug!(index = %self.name, written, total = state.rows.len(), "batch committed");
        Ok(written)
    }

    pub fn doc_count(&self) -> Result<u64> {
        self.state
            .read()
            .as_ref()
            .map(|state| state.rows.len() as u64)
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::CountUnavailable,
                    format!("could not get count of index '{}': index is closed", self.name),
                )
            })
    }

    /// Run `f` against the live state under a shared read lock.
    pub fn read<R>(&self, f: impl FnOnce(&IndexState) -> R) -> Option<R> {
        self.state.read().as_ref().map(f)
    }

    pub fn is_closed(&self) -> bool {
        self.state.read().is_none()
    }

    /// Release the index storage. Returns `true` only for the call that
    /// actually closed it.
    pub fn close(&self) -> bool {
        let released = self.state.write().take();
        match released {
            Some(state) => {
                info!(index = %self.name, id = %self.id, rows = state.rows.len(), "search index closed");
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for RowIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowIndex")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("analyzer", &self.analyzer.name)
            .field("allocated", &self.allocator.allocated())
            .field("closed", &self.is_closed())
            .finish()
    }
}
