#![deny(unsafe_code)]

//! Loaders that turn CSV and JSON files into raw trips/legs/links tables.
//!
//! Loaders never type or validate cell contents; they only establish the
//! column-to-value shape the normalizer in `triptab-validate` consumes.

pub mod csv;
pub mod error;
pub mod json;

pub use csv::read_csv_table;
pub use error::IngestError;
pub use json::{raw_table_from_json, read_json_table};
