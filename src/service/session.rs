use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use crate::core::config::Config;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::stats::IndexStats;
use crate::core::types::Table;
use crate::index::row_index::RowIndex;
use crate::query::sanitize::sanitize_phrase;
use crate::search::engine::QueryEngine;
use crate::service::events::SearchEvent;
use crate::service::notifier::Notifier;
use crate::service::presenter::ResultPresenter;
use crate::writer::index_builder::IndexBuilder;

/// One search session: build the index once, answer events until
/// cancelled, then release the index.
///
/// The index is only reachable through a started service, so readers never
/// observe a partially built index.
pub struct SearchService {
    index: Arc<RowIndex>,
    engine: QueryEngine,
    presenter: ResultPresenter,
    notifier: Notifier,
    cancel: CancellationToken,
    stats: IndexStats,
}

impl SearchService {
    /// Build the index from `tables` on a blocking worker.
    ///
    /// If indexing fails, one "unavailable" notification is sent and the
    /// error is returned. Cancellation aborts the build between batches.
    pub async fn start(
        config: Config,
        tables: Vec<Table>,
        notifier: Notifier,
        cancel: CancellationToken,
    ) -> Result<Self> {
        let presenter = ResultPresenter::new(config.notification_label_limit);
        let build_cancel = cancel.clone();

        let built = tokio::task::spawn_blocking(move || -> Result<(RowIndex, IndexStats)> {
            let builder = IndexBuilder::new(config.clone())?.with_cancellation(build_cancel);
            let index = builder.create_index(&config.index_name)?;
            match builder.index_tables(&index, &tables) {
                Ok(stats) => Ok((index, stats)),
                Err(e) => {
                    index.close();
                    Err(e)
                }
            }
        })
        .await
        .map_err(|e| Error::new(ErrorKind::Internal, format!("indexing task failed: {}", e)))
        .and_then(|built| built);

        match built {
            Ok((index, stats)) => {
                info!(index = index.name(), rows = stats.rows, "search service ready");
                Ok(SearchService {
                    index: Arc::new(index),
                    engine: QueryEngine::new(),
                    presenter,
                    notifier,
                    cancel,
                    stats,
                })
            }
            Err(e) if e.kind == ErrorKind::Cancelled => {
                info!("search index build cancelled");
                Err(e)
            }
            Err(e) => {
                error!(error = %e, "could not build search index");
                notifier.notify(presenter.unavailable(&e));
                Err(e)
            }
        }
    }

    pub fn index(&self) -> &Arc<RowIndex> {
        &self.index
    }

    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Handle one event on a detached worker.
    ///
    /// Returns the worker's handle, or `None` when the event is ignored
    /// (it carries a host error, or the session is shutting down). Search
    /// failures are logged and never reach the host.
    pub fn dispatch(&self, event: SearchEvent) -> Option<JoinHandle<()>> {
        if let Some(err) = &event.error {
            error!(source = ?event.source, error = %err, "received error in callback");
            return None;
        }
        if self.cancel.is_cancelled() {
            warn!(source = ?event.source, "search requested after shutdown");
            return None;
        }

        let index = self.index.clone();
        let engine = self.engine;
        let presenter = self.presenter.clone();
        let notifier = self.notifier.clone();
        let phrase = sanitize_phrase(&event.phrase);

        Some(tokio::spawn(async move {
            let query = phrase.clone();
            let searched = tokio::task::spawn_blocking(move || engine.search(&index, &query)).await;

            let results = match searched {
                Ok(Ok(results)) => results,
                Ok(Err(e)) => {
                    error!(phrase = %phrase, error = %e, "search failed");
                    return;
                }
                Err(e) => {
                    error!(phrase = %phrase, error = %e, "search worker panicked");
                    return;
                }
            };

            info!(source = ?event.source, phrase = %phrase, results = results.len(), "search completed");
            for result in &results {
                notifier.notify(presenter.present(&phrase, result));
            }
        }))
    }

    /// Serve events until the channel closes or the session is cancelled,
    /// then close the index.
    ///
    /// When the channel closes, searches already dispatched finish first.
    /// Cancellation closes the index right away; searches still running
    /// then fail and are logged.
    pub async fn run(&self, mut events: mpsc::Receiver<SearchEvent>) {
        let mut in_flight: Vec<JoinHandle<()>> = Vec::new();

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    info!(pending = in_flight.len(), "search service cancelled");
                    break;
                }
                event = events.recv() => match event {
                    Some(event) => {
                        let (mut done, pending): (Vec<_>, Vec<_>) =
                            in_flight.drain(..).partition(|handle| handle.is_finished());
                        in_flight = pending;
                        finish_in_flight(&mut done).await;
                        in_flight.extend(self.dispatch(event));
                    }
                    None => {
                        finish_in_flight(&mut in_flight).await;
                        break;
                    }
                },
            }
        }
        self.shutdown();
    }

    /// Cancel the session and release the index. Safe to call repeatedly;
    /// returns `true` only for the call that closed the index.
    pub fn shutdown(&self) -> bool {
        self.cancel.cancel();
        self.index.close()
    }
}

/// Wait for every dispatched search. Returns how many workers failed; each
/// failure is logged.
async fn finish_in_flight(in_flight: &mut Vec<JoinHandle<()>>) -> usize {
    let mut failed = 0;
    for handle in in_flight.drain(..) {
        if let Err(e) = handle.await {
            error!(error = %e, "search worker panicked");
            failed += 1;
        }
    }
    failed
}

impl Drop for SearchService {
    fn drop(&mut self) {
        self.index.close();
    }
}
