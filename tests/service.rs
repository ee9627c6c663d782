use std::sync::Arc;

use tablesift::core::config::Config;
use tablesift::core::types::{Row, Table};
use tablesift::service::events::{EventSource, SearchEvent};
use tablesift::service::notifier::{Notification, NotificationSink, Notifier};
use tablesift::service::session::SearchService;
use tablesift::ErrorKind;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Forwards every delivered notification to the test
struct ChannelSink {
    tx: mpsc::UnboundedSender<Notification>,
}

impl NotificationSink for ChannelSink {
    fn deliver(&self, notification: &Notification) -> tablesift::Result<()> {
        let _ = self.tx.send(notification.clone());
        Ok(())
    }
}

fn notifier() -> (Notifier, tokio::task::JoinHandle<()>, mpsc::UnboundedReceiver<Notification>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let (notifier, delivery) = Notifier::spawn(Arc::new(ChannelSink { tx }));
    (notifier, delivery, rx)
}

fn tables() -> Vec<Table> {
    let mut table = Table::new("issues", vec!["Key".to_string(), "Summary".to_string()]);
    table.push_row(Row::new().with_field("Key", "SIDE-1752").with_field("Summary", "Login page broken"));
    table.push_row(Row::new().with_field("Key", "SIDE-1753").with_field("Summary", "Login page slow"));
    table.push_row(Row::new().with_field("Key", "SIDE-1754").with_field("Summary", "Dark mode"));
    vec![table]
}

fn config() -> Config {
    Config {
        indexing_threads: 2,
        ..Config::default()
    }
}

fn drain(rx: &mut mpsc::UnboundedReceiver<Notification>) -> Vec<Notification> {
    let mut out = Vec::new();
    while let Ok(notification) = rx.try_recv() {
        out.push(notification);
    }
    out
}

#[tokio::test]
async fn dispatch_sends_one_notification_per_row() {
    let (notifier, delivery, mut rx) = notifier();
    let service = SearchService::start(config(), tables(), notifier.clone(), CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(service.stats().rows, 3);

    let handle = service
        .dispatch(SearchEvent::phrase(EventSource::GlobalSearch, "\"login page\""))
        .unwrap();
    handle.await.unwrap();

    drop(service);
    drop(notifier);
    delivery.await.unwrap();

    let notes = drain(&mut rx);
    assert_eq!(notes.len(), 2);
    for note in &notes {
        assert_eq!(note.label, "matched \"login page\"");
        assert!(note.markdown.contains("**Summary**: Login page"));
    }
}

#[tokio::test]
async fn host_errors_are_ignored() {
    let (notifier, _delivery, mut rx) = notifier();
    let service = SearchService::start(config(), tables(), notifier, CancellationToken::new())
        .await
        .unwrap();

    let handle = service.dispatch(SearchEvent::failed(EventSource::Clipboard, "clipboard locked"));
    assert!(handle.is_none());
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn no_match_sends_nothing() {
    let (notifier, delivery, mut rx) = notifier();
    let service = SearchService::start(config(), tables(), notifier.clone(), CancellationToken::new())
        .await
        .unwrap();

    service
        .dispatch(SearchEvent::phrase(EventSource::SearchBar, "kubernetes"))
        .unwrap()
        .await
        .unwrap();

    drop(service);
    drop(notifier);
    delivery.await.unwrap();
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn failed_build_sends_single_unavailable_notice() {
    let (notifier, delivery, mut rx) = notifier();
    let mut broken = tables();
    broken[0].push_row(Row::new().with_field("", "orphan value"));

    let err = SearchService::start(config(), broken, notifier.clone(), CancellationToken::new())
        .await
        .err()
        .unwrap();
    assert_eq!(err.kind, ErrorKind::FieldIndexFailed);

    drop(notifier);
    delivery.await.unwrap();

    let notes = drain(&mut rx);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].label, "Sheet search unavailable");
    assert!(notes[0].markdown.contains("overall row 4"));
}

#[tokio::test]
async fn cancelled_start_is_silent() {
    let (notifier, delivery, mut rx) = notifier();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = SearchService::start(config(), tables(), notifier.clone(), cancel)
        .await
        .err()
        .unwrap();
    assert_eq!(err.kind, ErrorKind::Cancelled);

    drop(notifier);
    delivery.await.unwrap();
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn shutdown_is_idempotent() {
    let (notifier, _delivery, _rx) = notifier();
    let service = SearchService::start(config(), tables(), notifier, CancellationToken::new())
        .await
        .unwrap();

    assert!(service.shutdown());
    assert!(!service.shutdown());
    assert!(service.index().is_closed());
    assert!(service.cancellation_token().is_cancelled());

    // Events after shutdown are refused
    assert!(service
        .dispatch(SearchEvent::phrase(EventSource::SearchBar, "login"))
        .is_none());
}

#[tokio::test]
async fn run_finishes_pending_searches_when_events_end() {
    let (notifier, delivery, mut rx) = notifier();
    let service = SearchService::start(config(), tables(), notifier.clone(), CancellationToken::new())
        .await
        .unwrap();

    let (tx, events) = mpsc::channel(8);
    tx.send(SearchEvent::phrase(EventSource::SearchBar, "SIDE-1752")).await.unwrap();
    tx.send(SearchEvent::phrase(EventSource::SearchBar, "dark mode")).await.unwrap();
    tx.send(SearchEvent::failed(EventSource::GlobalSearch, "host error")).await.unwrap();
    drop(tx);

    service.run(events).await;
    assert!(service.index().is_closed());

    drop(service);
    drop(notifier);
    delivery.await.unwrap();

    let mut labels: Vec<String> = drain(&mut rx).into_iter().map(|n| n.label).collect();
    labels.sort();
    assert_eq!(labels, vec!["matched \"SIDE-1752\"", "matched \"dark mode\""]);
}

#[tokio::test]
async fn run_stops_on_cancellation() {
    let (notifier, _delivery, _rx) = notifier();
    let cancel = CancellationToken::new();
    let service = SearchService::start(config(), tables(), notifier, cancel.clone())
        .await
        .unwrap();

    // Sender stays open, so only cancellation can end the loop
    let (_tx, events) = mpsc::channel::<SearchEvent>(1);
    cancel.cancel();
    service.run(events).await;

    assert!(service.index().is_closed());
}
