use std::sync::Arc;
use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, warn};
use crate::core::error::Result;

/// A message for the host to display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub label: String,
    pub markdown: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(label: impl Into<String>, markdown: impl Into<String>) -> Self {
        Notification {
            label: label.into(),
            markdown: markdown.into(),
            created_at: Utc::now(),
        }
    }
}

/// Host side of notification delivery
pub trait NotificationSink: Send + Sync + 'static {
    fn deliver(&self, notification: &Notification) -> Result<()>;
}

/// Best-effort, unbounded notification dispatch.
///
/// `notify` never blocks and never retries. A background task hands each
/// notification to the sink; delivery failures are logged and dropped.
#[derive(Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl Notifier {
    /// Start the delivery task. Must be called inside a tokio runtime.
    /// The task ends once every `Notifier` clone is dropped.
    pub fn spawn(sink: Arc<dyn NotificationSink>) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<Notification>();

        let handle = tokio::spawn(async move {
            while let Some(notification) = rx.recv().await {
                if let Err(e) = sink.deliver(&notification) {
                    error!(label = %notification.label, error = %e, "failed to emit notification");
                }
            }
        });

        (Notifier { tx }, handle)
    }

    pub fn notify(&self, notification: Notification) {
        if let Err(e) = self.tx.send(notification) {
            warn!(label = %e.0.label, "notification dropped: delivery task has stopped");
        }
    }
}
