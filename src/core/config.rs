use serde::{Serialize, Deserialize};

/// Rows buffered before a batch is committed to the index.
pub const DEFAULT_BATCH_SIZE: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub index_name: String,
    pub analyzer: String,

    pub batch_size: usize,                      // Flush threshold per table pass
    pub indexing_threads: usize,                // Rayon pool used to analyze rows

    pub file_extension: String,                 // Sheets picked up by discovery
    pub delimiter: char,

    pub notification_label_limit: usize,        // Max chars of the phrase echoed in a label
}

impl Default for Config {
    fn default() -> Self {
        Config {
            index_name: "tablesift-index".to_string(),
            analyzer: "en".to_string(),

            batch_size: DEFAULT_BATCH_SIZE,
            indexing_threads: num_cpus::get(),

            file_extension: "csv".to_string(),
            delimiter: ',',

            notification_label_limit: 80,
        }
    }
}
