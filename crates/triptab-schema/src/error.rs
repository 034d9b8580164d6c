#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("failed to read schema file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse schema document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown table name: {0} (expected trips, legs or links)")]
    UnknownTable(String),

    #[error("schema document is missing the {0} table")]
    MissingTable(String),

    #[error("duplicate column {column} in {table} table spec")]
    DuplicateColumn { table: String, column: String },

    #[error("table {table} declares no columns")]
    EmptyTable { table: String },
}
