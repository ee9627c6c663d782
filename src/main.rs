use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use tablesift::core::config::{Config, DEFAULT_BATCH_SIZE};
use tablesift::service::events::{EventSource, SearchEvent};
use tablesift::service::notifier::{Notification, NotificationSink, Notifier};
use tablesift::service::session::SearchService;
use tablesift::sheets::discovery::{documents_dir, files_by_extension};
use tablesift::sheets::reader::TableReader;

#[derive(Parser)]
#[command(name = "tablesift")]
#[command(about = "Phrase search over the rows of local CSV sheets", long_about = None)]
struct Args {
    /// Sheets to index; when empty, every matching file under --dir is used
    #[arg(long = "file", short = 'f')]
    files: Vec<PathBuf>,

    /// Directory scanned for sheets (defaults to the Documents folder)
    #[arg(long, env = "TABLESIFT_DIR")]
    dir: Option<PathBuf>,

    /// File extension picked up when scanning
    #[arg(long, env = "TABLESIFT_EXT", default_value = "csv")]
    ext: String,

    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Analyzer applied to every field (en, simple, keyword)
    #[arg(long, env = "TABLESIFT_ANALYZER", default_value = "en")]
    analyzer: String,

    #[arg(long, default_value = "tablesift-index")]
    index_name: String,

    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Print notifications as JSON lines
    #[arg(long)]
    json: bool,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            index_name: self.index_name.clone(),
            analyzer: self.analyzer.clone(),
            batch_size: self.batch_size,
            file_extension: self.ext.clone(),
            delimiter: self.delimiter,
            ..Config::default()
        }
    }
}

/// Prints notifications on stdout
struct StdoutSink {
    json: bool,
}

impl NotificationSink for StdoutSink {
    fn deliver(&self, notification: &Notification) -> tablesift::Result<()> {
        let mut out = std::io::stdout().lock();
        if self.json {
            let line = serde_json::to_string(notification).map_err(|e| {
                tablesift::Error::new(tablesift::ErrorKind::Internal, e.to_string())
            })?;
            writeln!(out, "{}", line)?;
        } else {
            writeln!(out, "## {}\n\n{}\n", notification.label, notification.markdown)?;
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.config();

    let files = if args.files.is_empty() {
        let dir = match &args.dir {
            Some(dir) => dir.clone(),
            None => documents_dir()?,
        };
        files_by_extension(&dir, &config.file_extension)?
    } else {
        args.files.clone()
    };

    let reader = TableReader::new(config.delimiter);
    let mut tables = Vec::with_capacity(files.len());
    for path in &files {
        match reader.read(path) {
            Ok(table) => tables.push(table),
            Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable sheet"),
        }
    }
    info!(sheets = tables.len(), "sheets loaded");

    let (notifier, delivery) = Notifier::spawn(Arc::new(StdoutSink { json: args.json }));
    let cancel = CancellationToken::new();

    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let service = match SearchService::start(config, tables, notifier.clone(), cancel.clone()).await {
        Ok(service) => service,
        Err(e) => {
            drop(notifier);
            let _ = delivery.await;
            return Err(e.into());
        }
    };

    let (tx, rx) = mpsc::channel::<SearchEvent>(64);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if line.trim().is_empty() {
                continue;
            }
            if tx.send(SearchEvent::phrase(EventSource::SearchBar, line)).await.is_err() {
                break;
            }
        }
    });

    service.run(rx).await;
    drop(service);
    drop(notifier);
    let _ = delivery.await;
    Ok(())
}
