pub mod core;
pub mod analysis;
pub mod index;
pub mod query;
pub mod search;
pub mod writer;
pub mod sheets;
pub mod service;

pub use crate::core::config::Config;
pub use crate::core::error::{Error, ErrorKind, Result};
pub use crate::core::row_id::RowIdAllocator;
pub use crate::core::types::{Row, RowId, Table};
pub use crate::index::row_index::RowIndex;
pub use crate::search::engine::QueryEngine;
pub use crate::search::results::SearchResult;
pub use crate::writer::index_builder::IndexBuilder;

/*
┌──────────────────────────────────────────────────────────────────────────────┐
│                         TABLESIFT STRUCT ARCHITECTURE                        │
└──────────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────── INPUT LAYER ─────────────────────────────────┐
│  ┌─────────────────────┐   ┌──────────────────────┐   ┌──────────────────┐   │
│  │ struct TableReader  │   │ fn files_by_extension│   │ struct Table     │   │
│  │ • delimiter: char   │   │ fn documents_dir     │   │ • name           │   │
│  │ • read() / parse()  │   └──────────────────────┘   │ • headers        │   │
│  └─────────────────────┘                              │ • rows: Vec<Row> │   │
│                                                       └──────────────────┘   │
└──────────────────────────────────────────────────────────────────────────────┘

┌─────────────────────────────── INDEXING LAYER ───────────────────────────────┐
│  ┌───────────────────────────┐   ┌────────────────────┐   ┌───────────────┐  │
│  │ struct IndexBuilder       │   │ struct Batch       │   │ RowIdAllocator│  │
│  │ • config: Config          │   │ • buffer: Vec<>    │   │ • last: Atomic│  │
│  │ • cancel: Option<Token>   │   │ • batch_size (100) │   └───────────────┘  │
│  │ • registry: Analyzers     │   └────────────────────┘                      │
│  │ • pool: rayon ThreadPool  │                                               │
│  └───────────────────────────┘                                               │
│                                                                              │
│  ┌───────────────────────────────────┐   ┌──────────────────────────────┐    │
│  │ struct RowIndex                   │   │ struct InvertedIndex         │    │
│  │ • id: SessionId / name            │   │ • postings: Term → Posting   │    │
│  │ • analyzer: Arc<Analyzer>         │   │   List (row_id, positions)   │    │
│  │ • allocator: RowIdAllocator       │   │                              │    │
│  │ • state: RwLock<Option<State>>    │   │ • doc_count                  │    │
│  └───────────────────────────────────┘   └──────────────────────────────┘    │
└──────────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────── SEARCH LAYER ────────────────────────────────┐
│  sanitize_phrase ──> PhraseQuery::analyze ──> PhraseMatcher ──> HitCollector │
│                                                    (roaring ∩, positions)    │
│  struct QueryEngine (stateless) ──returns──> Vec<SearchResult>               │
└──────────────────────────────────────────────────────────────────────────────┘

┌─────────────────────────────── SERVICE LAYER ────────────────────────────────┐
│  SearchEvent ──> SearchService::dispatch ──spawn──> QueryEngine::search      │
│                        │                                  │                  │
│                        └── CancellationToken   ResultPresenter ──> Notifier  │
│                                                      (unbounded, no retry)   │
└──────────────────────────────────────────────────────────────────────────────┘
*/
