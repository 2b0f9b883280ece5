// Error taxonomy for the registry
//
// Only opening the store and bulk reads surface errors. Single-row writes
// (add / update / delete / rename) report `false` and log instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Could not open database at {path}: {source}")]
    Connect {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Schema setup failed: {0}")]
    Schema(#[source] rusqlite::Error),

    #[error("Query failed: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
