pub mod config;
pub mod error;
pub mod row_id;
pub mod stats;
pub mod types;
