#![deny(unsafe_code)]

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown table name: {0} (expected trips, legs or links)")]
    UnknownTable(String),
}
