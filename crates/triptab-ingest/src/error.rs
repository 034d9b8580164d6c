#![deny(unsafe_code)]

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed csv in {path}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("malformed json in {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path} has no header row")]
    MissingHeader { path: PathBuf },

    #[error("expected a json array of row objects, found {found}")]
    NotAnArray { found: String },
}
