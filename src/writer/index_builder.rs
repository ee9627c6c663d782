use std::time::Instant;
use chrono::Utc;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use crate::analysis::analyzer::AnalyzerRegistry;
use crate::core::config::Config;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::stats::{IndexStats, TableStats};
use crate::core::types::{Row, Table};
use crate::index::row_index::{PreparedRow, RowIndex};
use crate::writer::batch::{Batch, PendingRow};

/// Single writer that turns tables into a searchable [`RowIndex`].
///
/// Rows get their ids from the target index's [`RowIdAllocator`](crate::core::row_id::RowIdAllocator), so ids
/// keep increasing across every table written into the same index. Rows are
/// buffered into batches of `config.batch_size`; each batch is analyzed on
/// the builder's rayon pool and committed with one write.
pub struct IndexBuilder {
    pub config: Config,
    pub registry: AnalyzerRegistry,
    pool: ThreadPool,
    cancel: Option<CancellationToken>,
}

impl IndexBuilder {
    pub fn new(config: Config) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.indexing_threads.max(1))
            .thread_name(|i| format!("tablesift-index-{}", i))
            .build()
            .map_err(|e| Error::new(ErrorKind::Internal, format!("could not start indexing pool: {}", e)))?;

        Ok(IndexBuilder {
            config,
            registry: AnalyzerRegistry::new(),
            pool,
            cancel: None,
        })
    }

    /// Abort between batches once `token` fires.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn create_index(&self, name: &str) -> Result<RowIndex> {
        let analyzer = self.registry.resolve(&self.config.analyzer).map_err(|e| {
            Error::new(
                ErrorKind::IndexCreationFailed,
                format!("could not create index '{}': {}", name, e.context),
            )
        })?;

        let index = RowIndex::new(name, analyzer);
        info!(index = name, id = %index.id(), analyzer = %self.config.analyzer, "created in-memory search index");
        Ok(index)
    }

    /// Index the rows of one table.
    ///
    /// A full batch is flushed before the next row is buffered, and the
    /// remainder is always flushed at the end, even when empty.
    pub fn index_table(&self, index: &RowIndex, rows: &[Row]) -> Result<TableStats> {
        let mut stats = TableStats::default();
        let mut batch = Batch::new(self.config.batch_size.max(1));

        for (position, row) in rows.iter().enumerate() {
            if batch.is_full() {
                stats.rows += self.flush(index, &mut batch)?;
                stats.flushes += 1;
                debug!(index = index.name(), flushed = stats.rows, "flushed index batch");
            }

            let row_id = index.allocator().next();
            batch.index(position, row_id, row.clone())?;
        }

        stats.rows += self.flush(index, &mut batch).map_err(|e| {
            Error::new(e.kind, format!("could not flush final batch: {}", e.context))
        })?;
        stats.flushes += 1;

        Ok(stats)
    }

    pub fn index_tables(&self, index: &RowIndex, tables: &[Table]) -> Result<IndexStats> {
        let start = Instant::now();
        let mut stats = IndexStats::new();

        for table in tables {
            let table_stats = self.index_table(index, &table.rows)?;
            debug!(table = %table.name, rows = table_stats.rows, flushes = table_stats.flushes, "indexed table");
            stats.absorb(&table_stats);
        }

        stats.elapsed = start.elapsed();
        stats.finished_at = Utc::now();
        info!(
            index = index.name(),
            tables = stats.tables,
            rows = stats.rows,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "search index for {} sheets took {:?} to build",
            stats.tables,
            stats.elapsed
        );
        Ok(stats)
    }

    fn flush(&self, index: &RowIndex, batch: &mut Batch) -> Result<usize> {
        self.check_cancelled()?;

        let pending = batch.take();
        let prepared: Vec<PreparedRow> = self.pool.install(|| {
            pending
                .into_par_iter()
                .map(|PendingRow { position, row_id, row }| {
                    let tokens = index.analyze_row(&row);
                    PreparedRow { position, row_id, row, tokens }
                })
                .collect()
        });

        index.apply(prepared).map_err(|e| {
            Error::new(ErrorKind::FlushFailed, format!("could not flush batch: {}", e.context))
        })
    }

    fn check_cancelled(&self) -> Result<()> {
        match &self.cancel {
            Some(token) if token.is_cancelled() => {
                Err(Error::new(ErrorKind::Cancelled, "indexing cancelled"))
            }
            _ => Ok(()),
        }
    }
}
