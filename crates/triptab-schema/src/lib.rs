#![deny(unsafe_code)]

pub mod catalog;
pub mod error;

pub use catalog::SchemaCatalog;
pub use error::SchemaError;
